pub mod api;
pub mod core;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::api::config::{DuplicatePolicy, RegistryConfig};
pub use crate::api::types::{ControllerId, EdgeId};
pub use crate::core::controller::{BodyList, Controller};
pub use crate::core::edge::ControllerEdge;
pub use crate::core::error::{ControllerError, InvariantViolation};
pub use crate::core::registry::ControllerRegistry;
pub use crate::core::time::{FixedTimestep, TimeStep};
pub use crate::systems::debug::{DebugColor, DebugDraw, DebugLines, DebugVertex};
