use glam::{UVec2, Vec2, Vec3};

use crate::config::{CenteringPolicy, GridConfig};

/// Project a 3D world position onto the solver's horizontal plane (x, z).
pub fn horizontal(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Flat index of grid cell `(ix, iy)` with row stride `stride` (= size_y + 1).
#[inline]
pub fn cell_index(ix: u32, iy: u32, stride: usize) -> usize {
    ix as usize * stride + iy as usize
}

/// Affine map between world space and grid cells.
///
/// Cell `(ix, iy)` covers `origin + [ix, ix + 1) * dx` on x (same on y), so
/// `world_to_grid(grid_to_world(c)) == c` for every valid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    pub origin: Vec2,
    pub cell_size: f32,
    /// Largest valid cell index per axis (`size_x`, `size_y`).
    pub max_cell: UVec2,
}

impl GridMapping {
    /// Mapping whose centre cell `(size_x/2, size_y/2)` is centred on `anchor`.
    pub fn centered_on(config: &GridConfig, anchor: Vec2) -> Self {
        let cell_size = config.cell_size as f32;
        let center = Self::center_cell_of(config).as_vec2();
        Self {
            origin: anchor - (center + Vec2::splat(0.5)) * cell_size,
            cell_size,
            max_cell: UVec2::new(config.size_x, config.size_y),
        }
    }

    /// Mapping for one generation run under the configured centering policy.
    pub fn for_run(config: &GridConfig, listener: Vec2) -> Self {
        match config.centering {
            CenteringPolicy::Static => Self::centered_on(config, Vec2::ZERO),
            CenteringPolicy::Dynamic => Self::centered_on(config, listener),
        }
    }

    /// Geometric centre cell of the grid.
    pub fn center_cell_of(config: &GridConfig) -> UVec2 {
        UVec2::new(config.size_x / 2, config.size_y / 2)
    }

    /// Grid cell containing `world`, or `None` if it falls outside the domain.
    pub fn world_to_grid(&self, world: Vec2) -> Option<UVec2> {
        let local = ((world - self.origin) / self.cell_size).floor();
        if !local.is_finite() || local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let cell = local.as_uvec2();
        if cell.x > self.max_cell.x || cell.y > self.max_cell.y {
            return None;
        }
        Some(cell)
    }

    /// World-space centre of cell `(ix, iy)`.
    pub fn grid_to_world(&self, cell: UVec2) -> Vec2 {
        self.origin + (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }

    /// World-space extent covered by the field.
    pub fn extent(&self) -> Vec2 {
        (self.max_cell + UVec2::ONE).as_vec2() * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size_x: u32, size_y: u32) -> GridConfig {
        GridConfig {
            size_x,
            size_y,
            cell_size: 0.5,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_static_origin_maps_to_center() {
        for (sx, sy) in [(4, 4), (5, 7), (80, 40)] {
            let cfg = config(sx, sy);
            let mapping = GridMapping::for_run(&cfg, Vec2::new(100.0, -3.0));
            assert_eq!(
                mapping.world_to_grid(Vec2::ZERO),
                Some(UVec2::new(sx / 2, sy / 2))
            );
        }
    }

    #[test]
    fn test_dynamic_listener_maps_to_center() {
        let cfg = GridConfig {
            centering: CenteringPolicy::Dynamic,
            ..config(10, 6)
        };
        let listener = Vec2::new(12.3, -4.7);
        let mapping = GridMapping::for_run(&cfg, listener);
        assert_eq!(mapping.world_to_grid(listener), Some(UVec2::new(5, 3)));
    }

    #[test]
    fn test_roundtrip_every_cell() {
        let cfg = config(6, 3);
        let mapping = GridMapping::centered_on(&cfg, Vec2::new(1.0, 2.0));
        for ix in 0..=6 {
            for iy in 0..=3 {
                let cell = UVec2::new(ix, iy);
                assert_eq!(mapping.world_to_grid(mapping.grid_to_world(cell)), Some(cell));
            }
        }
    }

    #[test]
    fn test_outside_domain_is_none() {
        let cfg = config(4, 4);
        let mapping = GridMapping::centered_on(&cfg, Vec2::ZERO);
        let half = mapping.extent() / 2.0;
        assert!(mapping.world_to_grid(Vec2::new(-half.x - 0.01, 0.0)).is_none());
        assert!(mapping.world_to_grid(Vec2::new(0.0, half.y + 0.01)).is_none());
        assert!(mapping.world_to_grid(Vec2::new(f32::NAN, 0.0)).is_none());
        assert!(mapping.world_to_grid(Vec2::new(-half.x + 0.01, half.y - 0.01)).is_some());
    }

    #[test]
    fn test_horizontal_uses_xz() {
        assert_eq!(horizontal(Vec3::new(1.0, 2.0, 3.0)), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_cell_index_row_major() {
        assert_eq!(cell_index(0, 0, 5), 0);
        assert_eq!(cell_index(0, 4, 5), 4);
        assert_eq!(cell_index(1, 0, 5), 5);
        assert_eq!(cell_index(3, 2, 5), 17);
    }
}
