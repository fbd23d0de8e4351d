//! Playback session control.
//!
//! A [`PlaybackSession`] owns at most one engine at a time. Engine callbacks
//! arrive on an event channel and are folded into observable state by a pump
//! task; user commands are issued sequentially through `&mut self`.

pub mod controller;
pub mod engine;
pub mod simulated;
pub mod state;

pub use controller::PlaybackSession;
pub use engine::{EngineError, EngineEvent, EngineEvents, EngineFactory, PlaybackEngine};
pub use simulated::{SimulatedEngine, SimulatedEngineHandle};
pub use state::SessionState;
