//! Curl command rewriting.

use super::params::{build_param_pairs, ParamPair};
use super::tokenizer::tokenize;
use super::url::{extract_url, substitute_url};
use crate::config::RewriteConfig;
use tracing::{debug, trace};

/// Separator between the parts of a rewritten command.
pub const LINE_SEPARATOR: &str = " \\\n  ";

/// Headers dropped by minimize mode (exact names, lowercase).
const MINIMIZE_HEADERS: &[&str] = &[
    "authorization",
    "user-agent",
    "cache-control",
    "pragma",
    "origin",
    "referer",
    "x-requested-with",
    "dnt",
    "connection",
    "upgrade-insecure-requests",
    "priority",
];

/// Header name prefixes dropped by minimize mode (lowercase).
const MINIMIZE_HEADER_PREFIXES: &[&str] = &["accept", "sec-fetch-", "sec-ch-ua"];

/// Flags dropped by minimize mode together with their values.
const MINIMIZE_FLAGS: &[&str] = &["-b", "--cookie", "--compressed", "-A", "--user-agent"];

/// Check a header name against the minimize denylist.
pub fn is_non_essential_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    MINIMIZE_HEADERS.contains(&name.as_str())
        || MINIMIZE_HEADER_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// How parameter pairs are filtered.
enum HeaderPolicy<'a> {
    /// Strip the fixed denylist
    Minimize,
    /// Strip toggled headers, optionally inject a bearer token
    Normal {
        config: &'a RewriteConfig,
        token: Option<&'a str>,
    },
}

impl HeaderPolicy<'_> {
    fn apply(&self, pairs: Vec<ParamPair>) -> Vec<ParamPair> {
        match self {
            HeaderPolicy::Minimize => pairs
                .into_iter()
                .filter(|pair| {
                    if MINIMIZE_FLAGS.contains(&pair.param.as_str()) {
                        trace!(flag = %pair.param, "Dropping non-essential flag");
                        return false;
                    }
                    match pair.header_name() {
                        Some(name) if is_non_essential_header(name) => {
                            trace!(header = %name, "Dropping non-essential header");
                            false
                        }
                        _ => true,
                    }
                })
                .collect(),
            HeaderPolicy::Normal { config, token } => {
                let mut pairs: Vec<ParamPair> = pairs
                    .into_iter()
                    .filter(|pair| {
                        !pair
                            .header_name()
                            .is_some_and(|name| config.is_header_disabled(name))
                    })
                    .collect();

                if let Some(token) = token {
                    inject_token(&mut pairs, token);
                }
                pairs
            }
        }
    }
}

/// Set the Authorization header to a bearer token, inserting it first when
/// the command has none.
fn inject_token(pairs: &mut Vec<ParamPair>, token: &str) {
    let value = format!("\"Authorization: Bearer {}\"", token);

    let existing = pairs.iter_mut().find(|pair| {
        pair.header_name()
            .is_some_and(|name| name.eq_ignore_ascii_case("authorization"))
    });

    match existing {
        Some(pair) => pair.value = Some(value),
        None => pairs.insert(0, ParamPair::new("-H", value)),
    }
}

/// Curl command rewriter.
pub struct CurlRewriter<'a> {
    config: &'a RewriteConfig,
}

impl<'a> CurlRewriter<'a> {
    /// Create a rewriter for a configuration.
    pub fn new(config: &'a RewriteConfig) -> Self {
        Self { config }
    }

    /// Rewrite a command.
    ///
    /// Commands with fewer than two tokens are returned unchanged.
    pub fn rewrite(&self, command: &str) -> String {
        let tokens = tokenize(command);
        if tokens.len() < 2 {
            debug!(tokens = tokens.len(), "Command too short to rewrite");
            return command.to_string();
        }

        let program = &tokens[0];
        let mut url = tokens[1].clone();

        let from = if self.config.url_from.is_empty() {
            extract_url(command)
        } else {
            self.config.url_from.clone()
        };

        if !self.config.url_to.is_empty() {
            if let Some(replaced) = substitute_url(&url, &from, &self.config.url_to) {
                debug!(from = %from, to = %self.config.url_to, "Substituted URL");
                url = replaced;
            }
        }

        let pairs = build_param_pairs(&tokens[2..]);
        let before = pairs.len();

        let policy = if self.config.minimize {
            HeaderPolicy::Minimize
        } else {
            HeaderPolicy::Normal {
                config: self.config,
                token: self.config.token(),
            }
        };
        let pairs = policy.apply(pairs);

        debug!(
            minimize = self.config.minimize,
            pairs_in = before,
            pairs_out = pairs.len(),
            "Rewrote curl command"
        );

        let head = format!("{} {}", program, url);
        if pairs.is_empty() {
            return head;
        }

        std::iter::once(head)
            .chain(pairs.iter().map(ParamPair::render))
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }
}

/// Rewrite a command with the given configuration.
pub fn rewrite(command: &str, config: &RewriteConfig) -> String {
    CurlRewriter::new(config).rewrite(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"curl "https://example.com/api/data" -H "Authorization: Bearer token123" -H "User-Agent: CustomAgent" -d "param=value""#;

    #[test]
    fn test_degenerate_input() {
        let config = RewriteConfig::default();
        assert_eq!(rewrite("curl", &config), "curl");
        assert_eq!(rewrite("", &config), "");
        assert_eq!(rewrite("  curl  ", &config), "  curl  ");
    }

    #[test]
    fn test_no_pairs() {
        let config = RewriteConfig::default();
        assert_eq!(rewrite("curl   https://x.com", &config), "curl https://x.com");
    }

    #[test]
    fn test_url_substitution() {
        let config = RewriteConfig {
            url_from: "https://example.com/api/data".to_string(),
            url_to: "http://127.0.0.1:6000".to_string(),
            ..Default::default()
        };
        let output = rewrite(SAMPLE, &config);
        assert_eq!(
            output,
            "curl \"http://127.0.0.1:6000\" \\\n  \
             -H \"Authorization: Bearer token123\" \\\n  \
             -H \"User-Agent: CustomAgent\" \\\n  \
             -d \"param=value\""
        );
    }

    #[test]
    fn test_url_auto_extracted() {
        let config = RewriteConfig {
            url_to: "http://localhost:8080/v2".to_string(),
            ..Default::default()
        };
        let output = rewrite("curl 'https://api.test/v1' -X POST", &config);
        assert_eq!(output, "curl 'http://localhost:8080/v2' \\\n  -X POST");
    }

    #[test]
    fn test_url_only_replaced_in_url_token() {
        let config = RewriteConfig {
            url_from: "https://a.test".to_string(),
            url_to: "http://b.test".to_string(),
            ..Default::default()
        };
        let output = rewrite("curl https://a.test/x -H 'Referer: https://a.test/'", &config);
        assert_eq!(
            output,
            "curl http://b.test/x \\\n  -H 'Referer: https://a.test/'"
        );
    }

    #[test]
    fn test_empty_target_url_leaves_url() {
        let config = RewriteConfig {
            url_from: "https://a.test".to_string(),
            ..Default::default()
        };
        assert_eq!(rewrite("curl https://a.test/x", &config), "curl https://a.test/x");
    }

    #[test]
    fn test_disabled_headers() {
        let mut config = RewriteConfig::default();
        config.disable_header("user-agent");
        let output = rewrite(SAMPLE, &config);
        assert!(!output.contains("User-Agent"));
        assert!(output.contains("Authorization: Bearer token123"));
        assert!(output.contains("-d \"param=value\""));
    }

    #[test]
    fn test_token_replaces_existing_authorization() {
        let config = RewriteConfig {
            new_token: Some("fresh".to_string()),
            ..Default::default()
        };
        let output = rewrite(SAMPLE, &config);
        assert!(output.contains("-H \"Authorization: Bearer fresh\""));
        assert!(!output.contains("token123"));
        assert_eq!(output.matches("Authorization").count(), 1);
    }

    #[test]
    fn test_token_inserted_first_when_missing() {
        let config = RewriteConfig {
            new_token: Some("fresh".to_string()),
            ..Default::default()
        };
        let output = rewrite("curl https://x.com -d a=1", &config);
        assert_eq!(
            output,
            "curl https://x.com \\\n  -H \"Authorization: Bearer fresh\" \\\n  -d a=1"
        );
    }

    #[test]
    fn test_disabled_authorization_then_token_inserted() {
        let mut config = RewriteConfig {
            new_token: Some("fresh".to_string()),
            ..Default::default()
        };
        config.disable_header("Authorization");
        let output = rewrite(SAMPLE, &config);
        assert!(output.starts_with(
            "curl \"https://example.com/api/data\" \\\n  -H \"Authorization: Bearer fresh\""
        ));
        assert!(!output.contains("token123"));
    }

    #[test]
    fn test_minimize_mode() {
        let config = RewriteConfig {
            minimize: true,
            ..Default::default()
        };
        let command = "curl 'https://x.com/api' \\\n  \
                       -H 'accept: application/json' \\\n  \
                       -H 'Accept-Language: en' \\\n  \
                       -H 'sec-ch-ua-mobile: ?0' \\\n  \
                       -H 'Sec-Fetch-Mode: cors' \\\n  \
                       -H 'Content-Type: application/json' \\\n  \
                       -H 'Authorization: Bearer x' \\\n  \
                       -b 'session=1' \\\n  \
                       -A 'Mozilla/5.0' \\\n  \
                       --data-raw '{\"a\":1}' \\\n  \
                       --compressed";
        let output = rewrite(command, &config);
        assert_eq!(
            output,
            "curl 'https://x.com/api' \\\n  \
             -H 'Content-Type: application/json' \\\n  \
             --data-raw '{\"a\":1}'"
        );
    }

    #[test]
    fn test_minimize_ignores_disabled_and_token() {
        let mut config = RewriteConfig {
            minimize: true,
            new_token: Some("t".to_string()),
            ..Default::default()
        };
        config.disable_header("X-Keep");
        let output = rewrite("curl https://x.com -H 'X-Keep: 1'", &config);
        assert_eq!(output, "curl https://x.com \\\n  -H 'X-Keep: 1'");
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let config = RewriteConfig {
            minimize: true,
            url_to: "http://127.0.0.1:6000".to_string(),
            ..Default::default()
        };
        let once = rewrite(SAMPLE, &config);
        let twice = rewrite(&once, &config);
        assert_eq!(once, twice);
        assert_eq!(once, "curl \"http://127.0.0.1:6000\" \\\n  -d \"param=value\"");
    }

    #[test]
    fn test_non_essential_header_names() {
        assert!(is_non_essential_header("Accept"));
        assert!(is_non_essential_header("accept-encoding"));
        assert!(is_non_essential_header("Sec-Ch-Ua-Platform"));
        assert!(is_non_essential_header("DNT"));
        assert!(!is_non_essential_header("Content-Type"));
        assert!(!is_non_essential_header("X-Api-Key"));
    }
}
