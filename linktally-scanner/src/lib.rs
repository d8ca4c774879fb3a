pub mod counter;
pub mod error;
pub mod links;
pub mod result;

pub use counter::LinkCounter;
pub use error::ScanError;
pub use result::TaskOutcome;
