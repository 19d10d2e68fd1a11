pub mod output_manager;
pub mod text_extractor;

pub use output_manager::OutputManager;
pub use text_extractor::{PdfTextExtractor, TextExtractor, PAGE_BREAK};
