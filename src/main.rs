//! `devkit` CLI entry point.
//!
//! Curl rewriting, JSON inspection and prompt generation from the command
//! line. Input is taken from an argument, a file or stdin; results go to
//! stdout and logs to stderr.

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use devkit_transform::curl::{parse_request, CurlRewriter};
use devkit_transform::json::{format_json, SortDirection};
use devkit_transform::prompt::{generate_prompt, ApiDocRequest};
use devkit_transform::{DevkitConfig, JsonSession};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "devkit")]
#[command(author, version, about = "Curl rewriting and JSON inspection utilities")]
struct Args {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, global = true, env = "DEVKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print example configuration and exit.
    #[arg(long)]
    example_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Curl command tools
    #[command(subcommand)]
    Curl(CurlCommand),
    /// JSON tools
    #[command(subcommand)]
    Json(JsonCommand),
    /// Generate an API documentation prompt
    Prompt(PromptArgs),
}

#[derive(Subcommand, Debug)]
enum CurlCommand {
    /// Rewrite a curl command (URL, headers, token)
    Rewrite(RewriteArgs),
    /// Print the request a curl command describes as JSON
    Inspect {
        /// Curl command; read from stdin when omitted or "-"
        command: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct RewriteArgs {
    /// Curl command; read from stdin when omitted or "-"
    command: Option<String>,

    /// URL to replace (defaults to the URL following `curl`)
    #[arg(long)]
    from: Option<String>,

    /// Replacement URL
    #[arg(long)]
    to: Option<String>,

    /// Header to remove (repeatable)
    #[arg(long = "disable-header", value_name = "NAME")]
    disable_headers: Vec<String>,

    /// Bearer token for the Authorization header
    #[arg(long)]
    token: Option<String>,

    /// Strip non-essential headers, cookies and --compressed
    #[arg(long)]
    minimize: bool,
}

#[derive(Subcommand, Debug)]
enum JsonCommand {
    /// Pretty-print a JSON document
    Format {
        /// Input file; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Spaces per indentation level (0 = compact)
        #[arg(long)]
        indent: Option<usize>,

        /// Sort object keys
        #[arg(long)]
        sort_keys: bool,
    },
    /// Extract, project, sort and aggregate a node
    Extract(ExtractArgs),
}

#[derive(ClapArgs, Debug)]
struct ExtractArgs {
    /// Input file; stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Path of the node to extract (e.g. "$.items")
    #[arg(short, long, default_value = "$")]
    path: String,

    /// Keys to keep, comma separated (defaults to the first three)
    #[arg(short, long, value_delimiter = ',')]
    keys: Option<Vec<String>>,

    /// Key to sort by
    #[arg(long)]
    order_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, default_value = "asc")]
    direction: SortDirection,

    /// Key to aggregate (repeatable)
    #[arg(long = "sum", value_name = "KEY")]
    sum_keys: Vec<String>,
}

#[derive(ClapArgs, Debug)]
struct PromptArgs {
    /// Route of the endpoint
    #[arg(long)]
    route: String,

    /// Request struct name
    #[arg(long)]
    request_struct: String,

    /// Response struct name
    #[arg(long, default_value = "")]
    response_struct: String,

    /// File containing the request struct source
    #[arg(long)]
    request_code: Option<PathBuf>,

    /// File containing the response struct source
    #[arg(long)]
    response_code: Option<PathBuf>,

    /// Shared filter references
    #[arg(long, default_value = "")]
    common_filters: String,
}

fn print_example_config() {
    let example = r#"# devkit configuration example
version: "1"

curl:
  # URL to replace; empty means "the URL right after curl"
  url_from: ""
  # Replacement URL
  url_to: "http://127.0.0.1:6000"
  # Headers removed when set to true
  disabled_headers:
    Authorization: false
    User-Agent: true
  # Bearer token written into the Authorization header
  new_token: ""
  # Strip browser headers, cookies and --compressed instead
  minimize: false

viewer:
  # Spaces per indentation level (0 = compact)
  indent_width: 4
  # Sort object keys recursively
  sort_keys: false
"#;
    println!("{}", example);
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn read_text(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => read_stdin(),
    }
}

fn read_file(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {}", p.display())),
        _ => read_stdin(),
    }
}

fn run_curl(command: CurlCommand, config: &DevkitConfig) -> Result<()> {
    match command {
        CurlCommand::Rewrite(args) => {
            let mut rewrite = config.curl.clone();
            if let Some(from) = args.from {
                rewrite.url_from = from;
            }
            if let Some(to) = args.to {
                rewrite.url_to = to;
            }
            for header in args.disable_headers {
                rewrite.disable_header(header);
            }
            if args.token.is_some() {
                rewrite.new_token = args.token;
            }
            rewrite.minimize |= args.minimize;

            let input = read_text(args.command)?;
            let output = CurlRewriter::new(&rewrite).rewrite(input.trim());
            println!("{}", output);
        }
        CurlCommand::Inspect { command } => {
            let input = read_text(command)?;
            let Some(request) = parse_request(&input) else {
                bail!("Input is not a curl command with a URL");
            };
            let value = serde_json::to_value(&request)?;
            println!("{}", format_json(&value, &config.viewer)?);
        }
    }
    Ok(())
}

fn run_json(command: JsonCommand, config: &DevkitConfig) -> Result<()> {
    match command {
        JsonCommand::Format {
            file,
            indent,
            sort_keys,
        } => {
            let input = read_file(file.as_deref())?;
            let doc = devkit_transform::json::parse(&input)?;

            let mut viewer = config.viewer.clone();
            if let Some(indent) = indent {
                viewer.indent_width = indent;
            }
            viewer.sort_keys |= sort_keys;

            println!("{}", format_json(&doc, &viewer)?);
        }
        JsonCommand::Extract(args) => {
            let input = read_file(args.file.as_deref())?;
            let mut session = JsonSession::from_text(&input)?;

            session.select(&args.path);
            if session.view().is_none() {
                bail!("No node at path {}", args.path);
            }

            if let Some(keys) = args.keys {
                session.set_selected_keys(keys);
            }
            if let Some(key) = &args.order_by {
                session.order_by(key, args.direction)?;
            }
            for key in &args.sum_keys {
                session.toggle_sum_key(key);
                if !session.sum_keys().contains(key) {
                    warn!(key = %key, "Ignoring non-numeric aggregate key");
                }
            }

            let output = serde_json::json!({
                "kind": session.kind(),
                "available_keys": session.fields().available,
                "selected_keys": session.fields().selected,
                "view": session.view(),
                "aggregate": session.aggregate(),
            });
            println!("{}", format_json(&output, &config.viewer)?);
        }
    }
    Ok(())
}

fn run_prompt(args: PromptArgs) -> Result<()> {
    let read_code = |path: Option<PathBuf>| -> Result<String> {
        match path {
            Some(p) => std::fs::read_to_string(&p)
                .with_context(|| format!("Failed to read code file: {}", p.display())),
            None => Ok(String::new()),
        }
    };

    let request = ApiDocRequest {
        route_path: args.route,
        request_struct: args.request_struct,
        response_struct: args.response_struct,
        request_code: read_code(args.request_code)?,
        response_code: read_code(args.response_code)?,
        common_filters: args.common_filters,
    };

    println!("{}", generate_prompt(&request));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Print example config if requested
    if args.example_config {
        print_example_config();
        return Ok(());
    }

    // Load configuration
    let config = match &args.config {
        Some(path) => DevkitConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DevkitConfig::default(),
    };
    debug!(config = ?args.config, "Configuration loaded");

    let Some(command) = args.command else {
        bail!("No command given; run with --help for usage");
    };

    match command {
        Command::Curl(cmd) => run_curl(cmd, &config)?,
        Command::Json(cmd) => run_json(cmd, &config)?,
        Command::Prompt(prompt) => run_prompt(prompt)?,
    }

    info!("Done");
    Ok(())
}
