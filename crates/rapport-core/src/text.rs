//! Display cleanup for annotation text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A run of text closed by terminal punctuation, or a trailing run without it.
static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]*[.!?]+|[^.!?]+").expect("sentence pattern is valid"));

const PARAGRAPH_BREAK: &str = "\n\n";

/// Reflows free-form text into one sentence per paragraph.
///
/// Whitespace (including newlines) is collapsed to single spaces, the text is
/// split after `.`, `!` or `?`, and the trimmed sentences are joined with a
/// blank line. Runs of punctuation stay attached to their sentence.
///
/// ```
/// use rapport_core::text::reflow_sentences;
///
/// assert_eq!(
///     reflow_sentences("Hello world. How are you? Fine!"),
///     "Hello world.\n\nHow are you?\n\nFine!"
/// );
/// ```
pub fn reflow_sentences(text: &str) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    SENTENCE
        .find_iter(&normalized)
        .map(|m| m.as_str().trim())
        .filter(|sentence| !sentence.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_BREAK)
}
