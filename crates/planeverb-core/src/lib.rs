pub mod config;
pub mod constants;
pub mod error;
pub mod excitation;
pub mod math;
pub mod types;

pub use config::{CenteringPolicy, ExecutionMode, GridConfig};
pub use error::ConfigError;
pub use math::GridMapping;
pub use types::{BoundaryKind, Cell, Real};
