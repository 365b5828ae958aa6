//! Contact form engine: field state, rules application and submission lifecycle

pub mod engine;
pub mod notifier;
pub mod state;
pub mod transport;

pub use engine::FormValidationEngine;
pub use notifier::BannerNotifier;
pub use state::*;
pub use transport::{SimulatedTransport, SubmissionTransport};
