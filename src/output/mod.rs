// Output formatting: terminal rendering of an analysis.

pub mod terminal;

/// One-line preview of `text`: whitespace runs collapsed to single spaces,
/// cut to at most `max_chars` characters with "..." appended when cut.
///
/// Counts chars, not bytes, so multi-byte text (section signs, umlauts)
/// never splits mid-character.
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
