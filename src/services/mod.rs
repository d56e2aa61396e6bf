pub mod notifications;
pub mod runner;
pub mod signals;
pub mod window;

pub use notifications::NotificationLog;
pub use runner::SignalRunner;
pub use signals::{Analyzer, CycleOutcome, StreamProcessor};
pub use window::BarWindow;
