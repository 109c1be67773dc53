use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use bugsnack::config::{load_config, validate_config, ConfigError, ReporterConfig};
use bugsnack::observability::logging::{init_logging, DEFAULT_FILTER};
use bugsnack::{
    FanOutReporter, ReportContext, ReportMetadata, Reporter, SharedError, TracedError,
    TracingReporter, WireReporter, WriterReporter,
};

#[derive(Parser)]
#[command(name = "bugsnack-cli")]
#[command(about = "Send one-off error reports to Bugsnag", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project API key. Falls back to the config file, then BUGSNAG_API_KEY.
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    #[arg(short, long)]
    release_stage: Option<String>,

    /// Deadline for the delivery request.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report an error message to Bugsnag
    Send(ReportArgs),
    /// Print the JSON payload without sending it
    Preview(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Error message to report.
    message: String,

    #[arg(long)]
    class: Option<String>,

    #[arg(long)]
    severity: Option<String>,

    #[arg(long)]
    context: Option<String>,

    #[arg(long)]
    grouping_hash: Option<String>,

    /// Event metadata entry, repeatable.
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    meta: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ReportedMessage(String);

impl ReportArgs {
    fn into_report(self) -> (SharedError, ReportMetadata) {
        let mut err = TracedError::new(ReportedMessage(self.message));
        if let Some(class) = self.class {
            err = err.with_class(class);
        }

        let mut metadata = ReportMetadata::new()
            .with_severity(self.severity.unwrap_or_default())
            .with_context(self.context.unwrap_or_default())
            .with_grouping_hash(self.grouping_hash.unwrap_or_default());
        for (key, value) in self.meta {
            metadata = metadata.insert_metadata(key, value);
        }

        (err.into_shared(), metadata)
    }
}

/// Apply command-line overrides. The API key comes from the flag, then the
/// config file, then `env_api_key`.
fn apply_overrides(
    config: &mut ReporterConfig,
    api_key: Option<String>,
    release_stage: Option<String>,
    env_api_key: Option<String>,
) {
    if let Some(api_key) = api_key {
        config.api_key = api_key;
    } else if config.api_key.is_empty() {
        config.api_key = env_api_key.unwrap_or_default();
    }
    if let Some(release_stage) = release_stage {
        config.release_stage = release_stage;
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(DEFAULT_FILTER)?;

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReporterConfig::default(),
    };
    apply_overrides(
        &mut config,
        cli.api_key,
        cli.release_stage,
        std::env::var("BUGSNAG_API_KEY").ok(),
    );
    validate_config(&config).map_err(ConfigError::Validation)?;

    let backup: Vec<Arc<dyn Reporter>> = vec![
        Arc::new(WriterReporter::stderr()),
        Arc::new(TracingReporter),
    ];
    let reporter = WireReporter::from_config(
        &config,
        Arc::new(reqwest::Client::new()),
        Arc::new(FanOutReporter::new(backup)),
    );

    match cli.command {
        Commands::Send(args) => {
            let (err, metadata) = args.into_report();
            let ctx = ReportContext::new().with_timeout(Duration::from_secs(cli.timeout_secs));
            tracing::info!(endpoint = %reporter.notifier().endpoint, "Sending error report");
            reporter.report(&ctx, err, Some(metadata)).await;
        }
        Commands::Preview(args) => {
            let (err, metadata) = args.into_report();
            let payload = reporter.payload(&err, Some(metadata));
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
