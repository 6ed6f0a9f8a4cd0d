pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod greeting;
pub mod log_checker;
pub mod logging;
pub mod processor;
pub mod record;
pub mod stats;
pub mod validation;

// Re-export the main types for easy access
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use greeting::greet;
pub use log_checker::DiagnosticCounter;
pub use logging::init_logging;
pub use processor::{ProcessResult, UserDataProcessor};
pub use record::{Activity, AgeGroup, AgeValue, ProcessedProfile, UserInput};
pub use stats::{calculate_average, find_max, summarize, DataSummary};
pub use validation::ValidationError;
