// Kahako Transform Module
// Dead-key state machine, chord table, composition guard and the engine
// that reconciles the input channels

pub mod chord;
pub mod composition;
pub mod deadkeys;
pub mod engine;
mod result;

pub use chord::chord_output;
pub use composition::CompositionGuard;
pub use deadkeys::{ArmState, DeadKeyState};
pub use engine::{Channel, Engine, EngineConfig, EngineError};
pub use result::TransformResult;
