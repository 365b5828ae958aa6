pub mod schedule;

pub use schedule::{Debouncer, ScheduledTask};
