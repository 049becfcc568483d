pub mod clock;
pub mod error;
pub mod provider;
pub mod types;
pub mod writer;

pub use clock::{Clock, SystemClock};
pub use error::{Error, ProviderError, ProviderErrorKind};
pub use provider::ContentProvider;
pub use types::{ArticleContent, ArticleResult, RunSummary, Topic};
pub use writer::DocumentWriter;

pub type Result<T> = std::result::Result<T, Error>;
