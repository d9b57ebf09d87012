//! Flag/value pairing for tokenized curl commands.

use serde::Serialize;

/// A flag optionally paired with the token that follows it.
///
/// Tokens that are not flags also end up here, with no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamPair {
    /// Flag (e.g. `-H`) or a standalone token
    pub param: String,
    /// Raw value token, quotes retained
    pub value: Option<String>,
}

impl ParamPair {
    /// Create a pair with a value.
    pub fn new(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            value: Some(value.into()),
        }
    }

    /// Create a bare flag or standalone token.
    pub fn bare(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            value: None,
        }
    }

    /// Whether this pair sets a request header.
    pub fn is_header(&self) -> bool {
        matches!(self.param.as_str(), "-H" | "--header")
    }

    /// Header name for header pairs: the text before the first `:`, without
    /// a leading quote.
    pub fn header_name(&self) -> Option<&str> {
        if !self.is_header() {
            return None;
        }
        let value = self.value.as_deref()?;
        let value = value.trim_start_matches(['"', '\'']);
        let name = value.split_once(':').map_or(value, |(name, _)| name);
        Some(name.trim())
    }

    /// Render as `flag value` or `flag`.
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{} {}", self.param, value),
            None => self.param.clone(),
        }
    }
}

fn starts_with_quote(token: &str) -> bool {
    token.starts_with(['"', '\''])
}

/// Pair each flag with its following token.
///
/// A flag takes the next token as its value when that token exists and
/// either does not start with `-` or starts with a quote. There is no
/// per-flag arity table, so a flag that takes no value followed by a bare
/// word will swallow that word.
pub fn build_param_pairs(tokens: &[String]) -> Vec<ParamPair> {
    let mut pairs = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if !token.starts_with('-') {
            pairs.push(ParamPair::bare(token.clone()));
            continue;
        }

        match iter.next_if(|next| !next.starts_with('-') || starts_with_quote(next)) {
            Some(value) => pairs.push(ParamPair::new(token.clone(), value.clone())),
            None => pairs.push(ParamPair::bare(token.clone())),
        }
    }

    pairs
}
