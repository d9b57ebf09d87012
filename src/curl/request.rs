//! Decode a curl command into the request it describes.

use super::tokenizer::{tokenize, unquote};
use serde::Serialize;

/// HTTP request described by a curl command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurlRequest {
    /// HTTP method (upper-case)
    pub method: String,
    /// Target URL
    pub url: String,
    /// Headers in command order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<String>,
}

impl CurlRequest {
    /// Get the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse the method, URL, headers and body out of a curl command.
///
/// Returns `None` if the input is not a curl command or has no URL.
/// Flags other than method, header and data flags are ignored.
pub fn parse_request(command: &str) -> Option<CurlRequest> {
    let tokens = tokenize(command);
    let mut iter = tokens.iter().map(|t| unquote(t));

    if !iter.next()?.eq_ignore_ascii_case("curl") {
        return None;
    }

    let mut method: Option<String> = None;
    let mut url = String::new();
    let mut headers = Vec::new();
    let mut body: Option<String> = None;

    while let Some(token) = iter.next() {
        match token.as_str() {
            "-X" | "--request" => {
                if let Some(m) = iter.next() {
                    method = Some(m.to_uppercase());
                }
            }
            "-H" | "--header" => {
                if let Some(h) = iter.next() {
                    if let Some((name, value)) = h.split_once(':') {
                        headers.push((name.trim().to_string(), value.trim().to_string()));
                    }
                }
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => {
                if let Some(d) = iter.next() {
                    body = Some(d);
                }
            }
            u if u.starts_with("http") && url.is_empty() => {
                url = u.to_string();
            }
            _ => {}
        }
    }

    if url.is_empty() {
        return None;
    }

    let method = match method {
        Some(m) if !(m == "GET" && body.is_some()) => m,
        _ if body.is_some() => "POST".to_string(),
        _ => "GET".to_string(),
    };

    Some(CurlRequest {
        method,
        url,
        headers,
        body,
    })
}
