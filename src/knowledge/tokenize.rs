//! Query normalisation: lowercase, strip punctuation, split into words.

/// A lowercased query and its word tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    pub lowercased: String,
    pub tokens: Vec<String>,
}

/// Lowercase `text` and split it into word tokens.
///
/// Every character that is not a letter, digit or whitespace acts as a
/// separator. Empty or whitespace-only input yields an empty [`Normalized`].
pub fn normalize(text: &str) -> Normalized {
    if text.trim().is_empty() {
        return Normalized::default();
    }

    let lowercased = text.to_lowercase();
    let cleaned: String = lowercased
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let tokens = cleaned.split_whitespace().map(str::to_string).collect();

    Normalized { lowercased, tokens }
}
