pub mod params;
pub mod pattern_builder;
pub mod value_extractor;

pub use params::{CharacterClass, ExtractionParameters, MAX_VALUE_LENGTH};
pub use pattern_builder::{CompiledMatcher, PatternBuilder};
pub use value_extractor::{extract_flexible, extract_primary, MatchStrategy};
