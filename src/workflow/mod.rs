pub mod batch;
pub mod results;

pub use batch::{BatchOutput, ExtractionProgress, ExtractionWorkflow};
pub use results::{ExtractionOutcome, ResultCounts, ResultMap};
