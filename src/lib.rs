//! Developer text utilities.
//!
//! - Curl command rewriting: URL substitution, header filtering, bearer
//!   token injection and a "minimize" mode that strips browser noise
//! - Curl request inspection (method, URL, headers, body)
//! - JSON node extraction, key projection, ordering and sum/avg/count
//! - JSON pretty-printing with configurable indentation and key sorting
//! - API documentation prompt generation
//!
//! ## Configuration Example
//!
//! ```yaml
//! curl:
//!   url_to: "http://127.0.0.1:6000"
//!   disabled_headers:
//!     User-Agent: true
//! viewer:
//!   indent_width: 2
//! ```
//!
//! ## Rewriting a command
//!
//! ```
//! use devkit_transform::{curl, RewriteConfig};
//!
//! let config = RewriteConfig {
//!     url_to: "http://127.0.0.1:6000".to_string(),
//!     minimize: true,
//!     ..Default::default()
//! };
//! let out = curl::rewrite(r#"curl "https://x.com/a" -H "Accept: */*" -d "p=v""#, &config);
//! assert_eq!(out, "curl \"http://127.0.0.1:6000\" \\\n  -d \"p=v\"");
//! ```

pub mod config;
pub mod curl;
pub mod json;
pub mod prompt;
pub mod session;

pub use config::{ConfigError, DevkitConfig, RewriteConfig, ViewerSettings};
pub use json::JsonError;
pub use session::JsonSession;
