//! GUI-facing backend actor

pub mod actor;
pub mod messages;

// Re-export for convenience
pub use actor::BackendActor;
pub use messages::{BackendCommand, BackendEvent};
