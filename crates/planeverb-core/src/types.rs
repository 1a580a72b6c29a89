use crate::constants::RIGID_REFLECTANCE;

/// Scalar type of every solver quantity. `f32` unless the `f64` feature is on.
#[cfg(not(feature = "f64"))]
pub type Real = f32;

/// Scalar type of every solver quantity. `f32` unless the `f64` feature is on.
#[cfg(feature = "f64")]
pub type Real = f64;

/// State of one grid point, as stored in the response buffer.
///
/// `rigidity` and `absorption` describe static geometry; only `pressure`,
/// `velocity_x` and `velocity_y` change during a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub pressure: Real,
    pub velocity_x: Real,
    pub velocity_y: Real,
    /// 1 for a propagating air cell, 0 for a wall cell.
    pub rigidity: Real,
    /// Wall reflection coefficient R in [0, 1], fed into `Y = (1 - R) / (1 + R)`.
    pub absorption: Real,
}

impl Cell {
    /// A resting cell of the given boundary kind.
    pub fn new(kind: BoundaryKind) -> Self {
        let (rigidity, absorption) = kind.coefficients();
        Self {
            pressure: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            rigidity,
            absorption,
        }
    }

    /// Boundary kind encoded by this cell's static coefficients.
    pub fn kind(&self) -> BoundaryKind {
        BoundaryKind::from_coefficients(self.rigidity, self.absorption)
    }

    /// Admittance derived from the absorption coefficient.
    pub fn admittance(&self) -> Real {
        admittance(self.absorption)
    }
}

/// Admittance `Y = (1 - R) / (1 + R)` of a wall with reflection coefficient `R`.
#[inline]
pub fn admittance(absorption: Real) -> Real {
    (1.0 - absorption) / (1.0 + absorption)
}

/// What a cell is made of, as far as the wave equation cares.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryKind {
    /// Freely propagating medium.
    #[default]
    Air,
    /// Perfectly reflecting wall (zero normal velocity on its faces).
    Rigid,
    /// Wall with reflection coefficient R in [0, 1].
    /// R = 0 is a matched, anechoic face; R = 1 behaves like `Rigid`.
    Absorptive(Real),
}

impl BoundaryKind {
    /// Lower to the `(rigidity, absorption)` pair used by the update equations.
    pub fn coefficients(self) -> (Real, Real) {
        match self {
            BoundaryKind::Air => (1.0, 0.0),
            BoundaryKind::Rigid => (0.0, RIGID_REFLECTANCE),
            BoundaryKind::Absorptive(r) => (0.0, r.clamp(0.0, 1.0)),
        }
    }

    /// Inverse of `coefficients`. Any non-zero rigidity reads as air.
    pub fn from_coefficients(rigidity: Real, absorption: Real) -> Self {
        if rigidity != 0.0 {
            BoundaryKind::Air
        } else if absorption >= RIGID_REFLECTANCE {
            BoundaryKind::Rigid
        } else {
            BoundaryKind::Absorptive(absorption)
        }
    }

    pub fn is_air(self) -> bool {
        matches!(self, BoundaryKind::Air)
    }
}
