//! preview command - generate issues without creating anything.

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::config::Config;
use crate::generator::{openai::OpenAiGenerator, IssueGenerator};
use crate::ui::output::{self, Verbosity};

/// Generate issues from the configured description and print them.
///
/// No tracker call is made; this is a dry run of the generation half of
/// the pipeline.
pub fn preview(config_path: &Path, json: bool, verbosity: Verbosity) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let mut generator = OpenAiGenerator::new(&config.openai_api_key);
    if let Some(model) = &config.openai_model {
        generator = generator.with_model(model);
    }
    if let Some(url) = &config.openai_api_url {
        generator = generator.with_api_url(url);
    }

    let rt = tokio::runtime::Runtime::new()?;
    let specs = rt.block_on(generator.generate(&config.project_description))?;

    if specs.is_empty() {
        bail!("no issues generated from the project description");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    output::print(format!("Generated {} issues:", specs.len()), verbosity);
    for (i, spec) in specs.iter().enumerate() {
        output::print(format!("{}. {}", i + 1, spec.title), verbosity);
        if !spec.labels.is_empty() {
            output::print(format!("   labels: {}", spec.labels.join(", ")), verbosity);
        }
    }
    Ok(())
}
