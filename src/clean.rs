/// Punctuation that survives cleaning.
const KEPT_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '"', '…'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Keep line breaks instead of flattening each document into one line.
    pub keep_newlines: bool,
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || ('\u{00C0}'..='\u{1EF9}').contains(&c)
        || KEPT_PUNCTUATION.contains(&c)
}

/// Strip unwanted symbols and normalize whitespace.
pub fn clean_text(text: &str, options: CleanOptions) -> String {
    let filtered = text
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect::<String>();

    if !options.keep_newlines {
        return filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    filtered
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
