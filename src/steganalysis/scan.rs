//! Batch scanning module
//!
//! Discovers candidate images under a directory tree, fans the analyses out
//! over the rayon pool and gathers them into a [`ScanReport`].
//!
//! [`ScanReport`]: crate::steganalysis::report::ScanReport

mod discovery;
mod scanner;
mod timing;
pub mod types;


pub use discovery::{discover, is_candidate, Discovery};
pub use scanner::BatchScanner;
pub use timing::{PhaseTiming, ScanTimings};
pub use types::{ScanConfig, ScanConfigBuilder, IMAGE_EXTENSIONS};
