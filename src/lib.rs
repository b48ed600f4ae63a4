pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod utils;

pub use config::Config;
pub use core::{Capability, ExtractionError, ExtractorEngine, StreamingService};
pub use extractors::NiconicoService;
