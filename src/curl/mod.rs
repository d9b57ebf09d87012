//! Curl command tokenizing, rewriting and inspection.

mod params;
mod request;
mod rewrite;
mod tokenizer;
mod url;

pub use params::{build_param_pairs, ParamPair};
pub use request::{parse_request, CurlRequest};
pub use rewrite::{is_non_essential_header, rewrite, CurlRewriter, LINE_SEPARATOR};
pub use tokenizer::{collapse_continuations, tokenize, unquote};
pub use url::{extract_url, substitute_url};
