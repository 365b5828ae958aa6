//! Output signals and the presentation-layer seams they are applied through

pub mod adapters;
pub mod signals;

pub use adapters::{JsonLinesUi, RecordingUi};
pub use signals::*;

/// Receives form signals and applies them to whatever presentation exists.
///
/// Implementations must not call back into the engine from `form_signal`.
pub trait FormUi: Send + Sync {
    fn form_signal(&self, signal: UiSignal);
}

pub trait NavigationUi: Send + Sync {
    fn nav_signal(&self, signal: NavSignal);
}
