pub mod logging;
pub mod orchestrator;
pub mod validation;

pub use logging::{init_logging, Logger};
pub use orchestrator::{backoff_delay, BatchConfig, BatchOrchestrator, INTERRUPTED_MESSAGE};
pub use validation::{ContentValidator, MinWordCount, NonEmpty};
