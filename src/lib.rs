pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpPageSource, storage::LocalStorage};
pub use config::WatcherConfig;
pub use crate::core::{dispatch::Dispatcher, state::HashStore, watcher::Watcher};
pub use utils::error::{Result, WatchError};
