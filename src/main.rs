use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::TimeDelta;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use bazel_version::config::{Config, DEFAULT_CACHE_TTL_SECS, DEFAULT_RELEASES_URL};

/// Environment variable controlling log verbosity (tracing `EnvFilter` syntax)
const LOG_ENV: &str = "BAZEL_VERSION_LOG";

#[derive(Parser, Debug)]
#[command(name = "bazel-version")]
#[command(
    version,
    about = "Print the Bazel release matching a version request",
    after_help = "QUERY is one of: latest, last_rc, <N>.x, <N>.*, or an exact tag such as 7.4.0"
)]
struct Cli {
    /// Version request, e.g. "latest", "last_rc", "7.4.0", "7.x", "7.*"
    query: Option<String>,

    /// Directory holding the cached release list
    #[arg(long, env = "BAZELISK_HOME", value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "BAZELISK_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Release feed URL
    #[arg(long, env = "BAZEL_VERSION_RELEASES_URL", default_value = DEFAULT_RELEASES_URL)]
    releases_url: String,

    /// Maximum age of the cached release list, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    cache_ttl: i64,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new(self.cache_dir.clone())?;
        config.releases_url = self.releases_url.clone();
        config.github_token = self.github_token.clone();
        config.cache_ttl = TimeDelta::try_seconds(self.cache_ttl)
            .with_context(|| format!("cache TTL out of range: {}", self.cache_ttl))?;
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, query: &str) -> anyhow::Result<String> {
    let config = cli.config()?;
    let cache = bazel_version::release_cache(&config).context("failed to create HTTP client")?;
    Ok(bazel_version::resolve(query, &cache)?)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported as errors too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(query) = cli.query.as_deref() else {
        // Usage goes to stdout with a failing status
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    init_logging();

    match run(&cli, query) {
        Ok(tag) => {
            println!("{tag}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
