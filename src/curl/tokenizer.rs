//! Quote- and escape-aware command line tokenizer.

use regex::Regex;
use std::sync::LazyLock;

/// Backslash-newline continuations, including the whitespace around them.
static CONTINUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\\\r?\n\s*").unwrap());

/// Replace every line continuation with a single space.
pub fn collapse_continuations(command: &str) -> String {
    CONTINUATION_REGEX.replace_all(command, " ").into_owned()
}

/// Split a command line into raw tokens.
///
/// Quotes and escape backslashes are kept in the tokens so that joining them
/// with spaces yields an equivalent command. Whitespace only separates tokens
/// outside quotes and when not escaped. An unterminated quote swallows the
/// rest of the input into the last token.
pub fn tokenize(command: &str) -> Vec<String> {
    let command = collapse_continuations(command);

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in command.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }

        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                }
            }
            None => match c {
                '\\' => {
                    current.push(c);
                    escaped = true;
                }
                '\'' | '"' => {
                    current.push(c);
                    quote = Some(c);
                }
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            },
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Remove one layer of surrounding quotes and resolve escapes.
///
/// Used when a token's literal value is needed rather than its shell form.
pub fn unquote(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in token.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }

        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => escaped = true,
            (Some(_), c) => out.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, c) => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_example_command() {
        let tokens = tokenize(
            r#"curl "https://x.com/a" -H "Authorization: Bearer t" -d "p=v""#,
        );
        assert_eq!(
            tokens,
            vec![
                "curl",
                r#""https://x.com/a""#,
                "-H",
                r#""Authorization: Bearer t""#,
                "-d",
                r#""p=v""#,
            ]
        );
    }

    #[test]
    fn test_single_quotes() {
        let tokens = tokenize("curl 'https://x.com' -H 'Accept: */*'");
        assert_eq!(tokens, vec!["curl", "'https://x.com'", "-H", "'Accept: */*'"]);
    }

    #[test]
    fn test_line_continuations_collapse() {
        let tokens = tokenize("curl https://x.com \\\n  -H 'A: b' \\\r\n  --compressed");
        assert_eq!(tokens, vec!["curl", "https://x.com", "-H", "'A: b'", "--compressed"]);
    }

    #[test]
    fn test_escaped_space_is_kept() {
        let tokens = tokenize(r"curl https://x.com/a\ b -d x");
        assert_eq!(tokens, vec!["curl", r"https://x.com/a\ b", "-d", "x"]);
    }

    #[test]
    fn test_escaped_quote_inside_double_quotes() {
        let tokens = tokenize(r#"curl -d "say \"hi\" now" x"#);
        assert_eq!(tokens, vec!["curl", "-d", r#""say \"hi\" now""#, "x"]);
    }

    #[test]
    fn test_mixed_quotes_in_one_token() {
        let tokens = tokenize(r#"curl -d '{"a": 1}'"#);
        assert_eq!(tokens, vec!["curl", "-d", r#"'{"a": 1}'"#]);
    }

    #[test]
    fn test_unterminated_quote() {
        let tokens = tokenize(r#"curl -H "Accept: x -d y"#);
        assert_eq!(tokens, vec!["curl", "-H", r#""Accept: x -d y"#]);
    }

    #[test]
    fn test_no_empty_tokens() {
        assert!(tokenize("   ").is_empty());
        assert_eq!(tokenize("  curl   x  "), vec!["curl", "x"]);
    }

    #[test]
    fn test_round_trip() {
        let cmd = r#"curl 'https://x.com/a?b=1' -H "X-A: 1" -d '{"k": "v w"}' --compressed"#;
        let joined = tokenize(cmd).join(" ");
        assert_eq!(tokenize(&joined), tokenize(cmd));
        assert_eq!(joined, cmd);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""Authorization: Bearer t""#), "Authorization: Bearer t");
        assert_eq!(unquote("'a b'"), "a b");
        assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
        assert_eq!(unquote(r"a\ b"), "a b");
        assert_eq!(unquote(r"'c:\dir'"), r"c:\dir");
    }
}
