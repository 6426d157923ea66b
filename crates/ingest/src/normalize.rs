use regex::Regex;

/// Collapses whitespace in raw document text before chunking.
pub struct TextNormalizer {
    whitespace: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Collapse every run of spaces, tabs, and newlines into a single space
    /// and trim the ends. Empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First `max_chars` characters of `text`, cut on a character boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
