//! generator::mock
//!
//! Mock generator implementation for deterministic testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{GeneratorError, IssueGenerator};
use crate::tracker::IssueSpec;

/// Mock generator returning a fixed issue list or a configured failure.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    inner: Arc<Mutex<MockGeneratorInner>>,
}

#[derive(Debug)]
struct MockGeneratorInner {
    specs: Vec<IssueSpec>,
    fail_with: Option<GeneratorError>,
    /// Descriptions passed to generate, for verification.
    calls: Vec<String>,
}

impl MockGenerator {
    /// Create a generator that returns the given specs.
    pub fn returning(specs: Vec<IssueSpec>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockGeneratorInner {
                specs,
                fail_with: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Create a generator that returns an empty list.
    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    /// Create a generator that fails with the given error.
    pub fn failing(error: GeneratorError) -> Self {
        let generator = Self::empty();
        {
            let mut inner = generator.inner.lock().unwrap();
            inner.fail_with = Some(error);
        }
        generator
    }

    /// Descriptions passed to `generate` so far.
    pub fn calls(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }
}

#[async_trait]
impl IssueGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, description: &str) -> Result<Vec<IssueSpec>, GeneratorError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(description.to_string());
        match &inner.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(inner.specs.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returning_yields_fixed_specs() {
        let specs = vec![IssueSpec {
            title: "Add login".into(),
            body: "Details".into(),
            labels: vec!["feature".into()],
        }];
        let generator = MockGenerator::returning(specs.clone());

        let result = generator.generate("a project").await.unwrap();
        assert_eq!(result, specs);
        assert_eq!(generator.calls(), vec!["a project"]);
    }

    #[tokio::test]
    async fn failing_yields_configured_error() {
        let generator = MockGenerator::failing(GeneratorError::Api("quota".into()));
        let result = generator.generate("a project").await;
        assert!(matches!(result, Err(GeneratorError::Api(_))));
    }

    #[tokio::test]
    async fn empty_yields_no_specs() {
        let generator = MockGenerator::empty();
        assert!(generator.generate("x").await.unwrap().is_empty());
    }
}
