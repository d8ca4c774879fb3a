pub mod collect;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod pipeline;

pub use collect::{OutputFormat, RunSummary};
pub use config::RunConfig;
pub use dispatch::{Dispatched, Dispatcher, UrlTask};
pub use error::RunError;
pub use pipeline::run;
