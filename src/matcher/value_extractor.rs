use crate::matcher::pattern_builder::CompiledMatcher;

/// Which strategy located a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The compiled pattern matched the full text
    Pattern,
    /// The value was taken from the line following the anchor
    NextLine,
}

/// Apply `matcher` to `text` and return its first capturing group.
///
/// An empty or non-participating group counts as no match.
pub fn extract_primary(text: &str, matcher: &CompiledMatcher) -> Option<String> {
    matcher
        .regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|group| group.as_str())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Primary pattern match first, then the line-proximity fallback.
pub fn extract_flexible(
    text: &str,
    matcher: &CompiledMatcher,
    anchor_pattern: &str,
    max_value_length: usize,
) -> Option<String> {
    extract_with_strategy(text, matcher, anchor_pattern, max_value_length).map(|(value, _)| value)
}

/// Same as [`extract_flexible`], also reporting which strategy produced the value.
pub fn extract_with_strategy(
    text: &str,
    matcher: &CompiledMatcher,
    anchor_pattern: &str,
    max_value_length: usize,
) -> Option<(String, MatchStrategy)> {
    if let Some(value) = extract_primary(text, matcher) {
        return Some((value, MatchStrategy::Pattern));
    }

    extract_next_line(text, anchor_pattern, max_value_length)
        .map(|value| (value, MatchStrategy::NextLine))
}

/// Scan for the first line containing `anchor_pattern` (case-insensitively) whose
/// following line is non-blank, and return that line trimmed and truncated to
/// `max_value_length` characters.
pub fn extract_next_line(text: &str, anchor_pattern: &str, max_value_length: usize) -> Option<String> {
    let anchor = anchor_pattern.to_lowercase();
    let lines: Vec<&str> = text.lines().collect();

    lines.windows(2).find_map(|pair| {
        if !pair[0].to_lowercase().contains(&anchor) {
            return None;
        }

        let candidate: String = pair[1].trim().chars().take(max_value_length).collect();
        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    })
}
