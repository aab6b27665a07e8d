pub mod models;
pub mod pipelines;
pub mod processing;
pub mod scanner;
pub mod utils;
pub mod validation;

pub use models::{DocumentType, Evidence, ExtractionResult, NormalizedField};
pub use pipelines::Extractor;
pub use scanner::{EmiratesIdScanner, PassportScanner};
pub use utils::{EngineConfig, ScanError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
