pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::compare::Comparer;
pub use core::fetcher::{make_valid_url, PaginatedFetcher};
pub use core::parser::parse_account_name;
pub use core::resolver::AccountResolver;
pub use core::scorer::score_overlap;
pub use domain::model::{CompareOutcome, Handle, RemoteAccount, ScoredAccount};
pub use domain::ports::ProgressSink;
pub use utils::error::{CompareError, Result};
