//! CDE Log Fetcher CLI
//!
//! Downloads the logs of every Spark job run on one or more CDE virtual
//! clusters into `logs/<cluster>/<job-run>/<log-type>/<cluster>.log`.
//!
//! Failures on a cluster, job run or log type are reported and skipped;
//! the process exits successfully once every endpoint has been visited.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cde_client::Credentials;
use cde_logs::{ClusterReport, ClusterStatus, Config, FetchReport, LogFetcher, SparkLogParser};

#[derive(Parser, Debug)]
#[command(name = "cde-logs")]
#[command(about = "Fetch Spark job run logs from CDE virtual clusters", long_about = None)]
struct Cli {
    /// Workload username
    #[arg(long, env = "CDE_USER")]
    user: String,

    /// Workload password
    #[arg(long, env = "CDE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Jobs API URLs of the virtual clusters to visit
    #[arg(long, required = true, num_args = 1..)]
    api_urls: Vec<String>,

    /// Fetch only this log type (e.g. driver/stdout)
    #[arg(long)]
    log_type: Option<String>,

    /// Retry transiently failing requests up to this many times
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        Config::new(Credentials::new(self.user, self.password), self.api_urls)
            .with_log_type(self.log_type)
            .with_retries(self.retries)
            .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cde_logs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    info!(
        "Fetching logs from {} cluster(s){}",
        config.api_urls.len(),
        config
            .log_type
            .as_deref()
            .map(|t| format!(", log type {}", t))
            .unwrap_or_default()
    );

    let fetcher = LogFetcher::new(config.connector(), SparkLogParser, config.fetch_options());
    let report = fetcher.run(&config.api_urls).await;

    print_summary(&report);

    Ok(())
}

/// Print the per-cluster outcome of a run
fn print_summary(report: &FetchReport) {
    println!();
    println!("{}", "Summary:".bold());

    for cluster in &report.clusters {
        print_cluster(cluster);
    }

    println!();
    let totals = format!(
        "{} log(s) saved, {} failed, {} of {} cluster(s) failed",
        report.artifacts_saved(),
        report.artifacts_failed(),
        report.clusters_failed(),
        report.clusters.len()
    );

    if report.artifacts_failed() > 0 || report.clusters_failed() > 0 {
        println!("{}", totals.yellow());
    } else {
        println!("{}", totals.green());
    }
}

fn print_cluster(cluster: &ClusterReport) {
    let status = match &cluster.status {
        ClusterStatus::Completed => "done".green(),
        ClusterStatus::NoJobRuns => "no job runs".yellow(),
        ClusterStatus::Failed(_) => "failed".red(),
    };

    println!("  {} {} [{}]", "▸".cyan(), cluster.name(), status);

    if let ClusterStatus::Failed(reason) = &cluster.status {
        println!("    Error:     {}", reason.red());
        return;
    }

    println!(
        "    Job runs:  {} ({} skipped, {} failed)",
        cluster.job_runs, cluster.job_runs_skipped, cluster.job_runs_failed
    );
    println!(
        "    Logs:      {} saved, {} failed",
        cluster.saved.len(),
        cluster.artifacts_failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_arguments() {
        let cli = Cli::try_parse_from([
            "cde-logs",
            "--user",
            "u",
            "--password",
            "p",
            "--api-urls",
            "https://a.example.com",
            "https://b.example.com",
        ])
        .unwrap();

        assert_eq!(cli.api_urls.len(), 2);
        assert!(cli.log_type.is_none());
        assert_eq!(cli.retries, 0);
        assert_eq!(cli.timeout, 60);
    }

    #[test]
    fn test_parse_into_config() {
        let cli = Cli::try_parse_from([
            "cde-logs",
            "--user",
            "u",
            "--password",
            "p",
            "--api-urls",
            "https://a.example.com",
            "--log-type",
            "driver/stdout",
            "--retries",
            "2",
            "--timeout",
            "10",
        ])
        .unwrap();

        let config = cli.into_config();
        assert_eq!(config.log_type.as_deref(), Some("driver/stdout"));
        assert_eq!(config.retries, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_urls_are_required() {
        let result = Cli::try_parse_from(["cde-logs", "--user", "u", "--password", "p"]);
        assert!(result.is_err());
    }
}
