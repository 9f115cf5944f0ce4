use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pipedag_core::Pipeline;
use pipedag_core::report::{PipelineReport, ReportFormat};
use pipedag_server::{CorsPolicy, ParseClient, ServerConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Install the fmt subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Read a pipeline from a file, or from stdin when the path is `-`
pub fn load_pipeline_from_source(source: Option<&PathBuf>) -> Result<Pipeline> {
    match source {
        Some(path) if path.as_os_str() != "-" => load_pipeline_from_file(path),
        _ => {
            debug!("Reading pipeline from stdin");
            Pipeline::from_reader(io::stdin().lock()).context("Failed to parse pipeline from stdin")
        }
    }
}

/// Load a pipeline file, expanding a leading `~`
pub fn load_pipeline_from_file(path: &Path) -> Result<Pipeline> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = Path::new(&expanded);
    debug!("Reading pipeline from {}", path.display());
    Ok(Pipeline::from_file(path)?)
}

pub fn write_report(report: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", report),
    }
    Ok(())
}

/// Build the server configuration from `serve` arguments
pub fn server_config_from_args(args: &ArgMatches) -> ServerConfig {
    let host = args
        .get_one::<String>("host")
        .cloned()
        .unwrap_or_else(|| pipedag_server::config::DEFAULT_HOST.to_string());
    let port = args
        .get_one::<u16>("port")
        .copied()
        .unwrap_or(pipedag_server::config::DEFAULT_PORT);
    let origins: Vec<String> = args
        .get_many::<String>("allow-origin")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    ServerConfig::new(host, port).with_cors(CorsPolicy::from_origins(origins))
}

pub async fn handle_serve(args: &ArgMatches) -> Result<()> {
    let config = server_config_from_args(args);
    println!(
        "{} Serving on {}",
        "→".blue(),
        format!("http://{}", config.bind_address()).bright_white()
    );
    println!("{} CORS: {}", "→".blue(), config.cors);
    if config.cors == CorsPolicy::AllowAll {
        println!(
            "{} All origins allowed. Pass --allow-origin in production.",
            "⚠".yellow().bold()
        );
    }

    pipedag_server::serve(config)
        .await
        .context("Server stopped with an error")
}

pub fn handle_check(args: &ArgMatches) -> Result<()> {
    let file = args.get_one::<PathBuf>("FILE");
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = args.get_one::<PathBuf>("output");

    let pipeline = load_pipeline_from_source(file)?;
    let report = PipelineReport::build(&pipeline);
    info!(
        "Checked pipeline: {} nodes, {} edges, dag={}",
        report.result.node_count, report.result.edge_count, report.result.is_dag
    );

    let rendered = report
        .render(format)
        .context("Failed to render report")?;
    write_report(&rendered, output)
}

pub async fn handle_submit(args: &ArgMatches) -> Result<()> {
    let file = args.get_one::<PathBuf>("FILE");
    let url = args
        .get_one::<Url>("url")
        .context("A server URL is required")?;
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);

    let pipeline = load_pipeline_from_source(file)?;
    let client = ParseClient::with_timeout(url.as_str(), timeout)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Submitting pipeline to {}", client.base_url()));

    let result = client.parse(&pipeline).await;
    spinner.finish_and_clear();
    let result = result?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
