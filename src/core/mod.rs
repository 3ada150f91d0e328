pub mod compare;
pub mod fetcher;
pub mod parser;
pub mod resolver;
pub mod scorer;

pub use crate::domain::model::{CompareOutcome, Handle, RemoteAccount, ScoredAccount};
pub use crate::domain::ports::ProgressSink;
pub use crate::utils::error::Result;
