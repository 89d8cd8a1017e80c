// Draft domain: session state and the allocation engine.

pub mod engine;
pub mod state;
