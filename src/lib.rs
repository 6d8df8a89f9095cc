pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::FileStore;
pub use config::settings::Settings;
pub use crate::core::{
    completion::CompletionSource,
    session::{CompletionSession, COMPLETION_POPUP},
};
pub use domain::store::CandidateStore;
pub use utils::error::{CandidateError, Result};
