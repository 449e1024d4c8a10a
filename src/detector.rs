use std::sync::LazyLock;

use regex::Regex;

/// Shape of a Discord bot token: 24 alphanumerics, a 6 char timestamp and a
/// 27 char HMAC, dot separated. Classes are ASCII only.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]{24}\.[A-Za-z0-9_-]{6}\.[A-Za-z0-9_-]{27}")
        .expect("token pattern is valid")
});

/// Every non-overlapping token-shaped substring of `text`, left to right.
/// Duplicates are kept.
pub fn find_tokens(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
