//! URL extraction and substitution.

use super::tokenizer::collapse_continuations;
use regex::Regex;
use std::sync::LazyLock;

/// `curl`, whitespace, optional quote, the URL, optional quote.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^curl\s+['"]?([^'"\s]+)['"]?"#).unwrap());

/// Extract the URL that directly follows `curl`.
///
/// Returns an empty string when the command does not start that way.
pub fn extract_url(command: &str) -> String {
    let command = collapse_continuations(command);
    URL_REGEX
        .captures(command.trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Replace the first literal occurrence of `from` in `url_token`.
///
/// Returns `None` when `from` is empty or does not occur.
pub fn substitute_url(url_token: &str, from: &str, to: &str) -> Option<String> {
    if from.is_empty() || !url_token.contains(from) {
        return None;
    }
    Some(url_token.replacen(from, to, 1))
}
