use glam::{UVec2, Vec3};
use planeverb_core::{BoundaryKind, GridConfig};
use planeverb_fdtd::{Grid, SolverError};

/// Geometry placed into the grid before timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneLayout {
    /// No walls at all.
    OpenField,
    /// Absorptive walls one cell inside the domain edge.
    Room { absorption: f32 },
    /// Rigid wall across the middle with a single opening.
    OccludedCorridor,
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub layout: SceneLayout,
    pub listener: [f32; 3],
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "open-field",
            layout: SceneLayout::OpenField,
            listener: [0.0, 0.0, 0.0],
        },
        SceneConfig {
            name: "room",
            layout: SceneLayout::Room { absorption: 0.3 },
            listener: [1.0, 1.7, -0.5],
        },
        SceneConfig {
            name: "occluded-corridor",
            layout: SceneLayout::OccludedCorridor,
            listener: [-2.0, 1.7, 0.0],
        },
    ]
}

impl SceneConfig {
    pub fn listener_position(&self) -> Vec3 {
        Vec3::from_array(self.listener)
    }
}

/// Write a scene's walls into `grid`.
pub fn build_scene(grid: &mut Grid, layout: SceneLayout) -> Result<(), SolverError> {
    let config = grid.config().clone();
    let max = UVec2::new(config.size_x, config.size_y);

    match layout {
        SceneLayout::OpenField => Ok(()),
        SceneLayout::Room { absorption } => {
            let kind = BoundaryKind::Absorptive(absorption as planeverb_core::Real);
            let lo = UVec2::ONE;
            let hi = max.saturating_sub(UVec2::ONE);
            grid.fill_rect(lo, UVec2::new(hi.x, lo.y), kind)?;
            grid.fill_rect(UVec2::new(lo.x, hi.y), hi, kind)?;
            grid.fill_rect(lo, UVec2::new(lo.x, hi.y), kind)?;
            grid.fill_rect(UVec2::new(hi.x, lo.y), hi, kind)
        }
        SceneLayout::OccludedCorridor => {
            let mid = max.x / 2 + max.x / 8;
            let gap = max.y / 2;
            let opening = (max.y / 10).max(1);
            if gap > opening {
                grid.fill_rect(
                    UVec2::new(mid, 0),
                    UVec2::new(mid, gap - opening),
                    BoundaryKind::Rigid,
                )?;
            }
            if gap + opening <= max.y {
                grid.fill_rect(
                    UVec2::new(mid, gap + opening),
                    UVec2::new(mid, max.y),
                    BoundaryKind::Rigid,
                )?;
            }
            Ok(())
        }
    }
}

/// Grid configuration used when no config file is given.
pub fn default_config() -> GridConfig {
    GridConfig::default()
}
