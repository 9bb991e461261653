//! generator::prompt
//!
//! Prompt construction for the issue-generation model.

/// System message framing the model's role.
pub(crate) const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates GitHub issues for software projects.";

/// Build the user prompt for a project description.
///
/// The prompt asks for a bare JSON array so the response can be parsed
/// directly; fence-stripping in the parser covers models that wrap it
/// anyway.
pub fn build_prompt(description: &str) -> String {
    format!(
        r#"You are an expert project manager who specializes in creating GitHub issues for software projects.
Based on the following project description, generate 5-10 well-structured GitHub issues.

Project Description: {description}

For each issue, include:
1. A clear, concise title
2. A detailed description that explains what needs to be done
3. 2-3 relevant labels (like "feature", "bug", "enhancement", "documentation", etc.)

Format the response as a JSON array of objects, where each object has the following structure:
{{
  "title": "Issue title",
  "body": "Detailed description",
  "labels": ["label1", "label2"]
}}

Only provide the JSON array, with no additional text."#
    )
}
