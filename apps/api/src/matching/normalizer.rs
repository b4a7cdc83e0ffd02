/// Lower-cases `text`, turns every character outside `[a-z0-9\s]` into a space,
/// collapses whitespace runs to a single space and trims.
pub fn normalize_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
