//! run command - generate issues and create them in the repository.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::generator::openai::OpenAiGenerator;
use crate::pipeline::{Pipeline, RunReport, SubmissionResult};
use crate::tracker::github::GitHubTracker;
use crate::ui::output::{self, Verbosity};

/// Run the full pipeline: probe, generate, reconcile labels, submit.
///
/// Exits non-zero (via the returned error) only for precondition
/// failures: bad config, unreachable repository, generator failure or
/// empty output, or a failed label listing. Per-item failures appear in
/// the summary and leave the exit status at zero.
pub fn run(config_path: &Path, delay_ms: u64, verbosity: Verbosity) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let tracker = match &config.github_api_url {
        Some(base) => {
            GitHubTracker::with_api_base(&config.github_token, &config.owner, &config.repo, base)
        }
        None => GitHubTracker::new(&config.github_token, &config.owner, &config.repo),
    };

    let mut generator = OpenAiGenerator::new(&config.openai_api_key);
    if let Some(model) = &config.openai_model {
        generator = generator.with_model(model);
    }
    if let Some(url) = &config.openai_api_url {
        generator = generator.with_api_url(url);
    }

    output::print(
        format!("Target repository: {}/{}", config.owner, config.repo),
        verbosity,
    );

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(
        Pipeline::new(&tracker, &generator)
            .with_delay(Duration::from_millis(delay_ms))
            .with_verbosity(verbosity)
            .run(&config.project_description),
    )?;

    print_summary(&report, verbosity);
    Ok(())
}

/// Print the end-of-run summary.
fn print_summary(report: &RunReport, verbosity: Verbosity) {
    output::print("", verbosity);
    output::success(
        format!(
            "Done: {} of {} issues created",
            report.created_count(),
            report.results.len()
        ),
        verbosity,
    );

    if !report.labels.created.is_empty() {
        let names: Vec<_> = report
            .labels
            .created
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        output::print(format!("Labels created: {}", names.join(", ")), verbosity);
    }

    for (spec, result) in report.specs.iter().zip(&report.results) {
        match result {
            SubmissionResult::Created { .. } => {}
            SubmissionResult::Rejected { status, message } => {
                output::warn(
                    format!("\"{}\" rejected ({}): {}", spec.title, status, message),
                    verbosity,
                );
            }
            SubmissionResult::TransportError { message } => {
                output::warn(
                    format!("\"{}\" failed in transport: {}", spec.title, message),
                    verbosity,
                );
            }
        }
    }
}
