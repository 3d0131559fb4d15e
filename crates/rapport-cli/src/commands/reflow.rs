use rapport_core::text::reflow_sentences;

/// Prints `text` with one sentence per paragraph.
pub fn run(text: &str) {
    println!("{}", reflow_sentences(text));
}
