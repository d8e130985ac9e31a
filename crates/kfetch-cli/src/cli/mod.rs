//! CLI for kfetch.
//!
//! The run is three states: Configuring (flags and config), Transferring (one
//! blocking request) and Reporting (outcome and exit code).

mod commands;
mod help;

use anyhow::Result;
use clap::Parser;
use kfetch_core::config::{self, KfetchConfig};
use kfetch_core::logging;
use kfetch_core::report::{Reporter, EXIT_FAILURE};
use kfetch_core::request::RequestConfig;
use std::ffi::OsString;
use std::path::PathBuf;

use commands::run_fetch;

/// Top-level flags. clap's own `-h`/`-V` handling is disabled: `-h` and `-v`
/// print their text and the run continues.
#[derive(Debug, Parser)]
#[command(name = "kfetch")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// URL to fetch.
    #[arg(short = 'u', value_name = "URL")]
    pub url: Option<String>,

    /// Output file path.
    #[arg(short = 'f', value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// HTTP method, sent verbatim.
    #[arg(short = 'm', value_name = "METHOD")]
    pub method: Option<String>,

    /// Request body.
    #[arg(short = 'd', value_name = "DATA", allow_hyphen_values = true)]
    pub data: Option<String>,

    /// Request header line; repeat for more headers.
    #[arg(short = 'H', value_name = "HEADER", allow_hyphen_values = true)]
    pub headers: Vec<String>,

    /// CA certificate bundle.
    #[arg(short = 'c', value_name = "CA_PATH")]
    pub ca_path: Option<PathBuf>,

    /// Print the version.
    #[arg(short = 'v')]
    pub show_version: bool,

    /// Print help.
    #[arg(short = 'h')]
    pub show_help: bool,
}

impl Cli {
    /// Resolve the request: flags first, then config values, then built-in defaults.
    pub fn into_request(self, url: String, cfg: &KfetchConfig) -> RequestConfig {
        let mut request = RequestConfig::new(url);
        request.output_path = self.output.unwrap_or_else(|| cfg.output_path.clone());
        request.method = self.method.unwrap_or_else(|| cfg.method.clone());
        request.body = self.data;
        request.headers = self.headers;
        request.ca_path = self.ca_path;
        request
    }
}

pub fn run_from_args() -> Result<i32> {
    run(std::env::args_os())
}

pub fn run<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut reporter = Reporter::terminal();

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or("invalid arguments");
            reporter.error(first)?;
            reporter.error(help::USAGE)?;
            return Ok(EXIT_FAILURE);
        }
    };

    if cli.show_version {
        println!("{}", help::version_line());
    }
    if cli.show_help {
        print!("{}", help::help_text());
    }

    let Some(url) = cli.url.clone() else {
        reporter.error(help::MISSING_URL)?;
        return Ok(EXIT_FAILURE);
    };

    let cfg = config::load()?;
    init_logging(&cfg);
    tracing::debug!("loaded config: {:?}", cfg);

    let request = cli.into_request(url, &cfg);
    tracing::debug!(
        method = %request.method,
        headers = request.headers.len(),
        output = %request.output_path.display(),
        "request configured"
    );

    let outcome = run_fetch(&request, &cfg)?;
    reporter.report(&outcome)?;
    Ok(outcome.exit_code())
}

fn init_logging(cfg: &KfetchConfig) {
    if !cfg.log_to_file {
        logging::init_stderr();
        return;
    }
    if let Err(e) = logging::init_state_file() {
        logging::init_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }
}

#[cfg(test)]
mod tests;
