use async_trait::async_trait;
use langdetect_api::{Error, Result, model::LanguageModel};
use std::sync::{Arc, Mutex};

/// Mock language model for testing
#[derive(Debug, Clone)]
pub struct MockLanguageModel {
    pub language: String,
    pub version: String,
    pub requests: Arc<Mutex<Vec<String>>>,
    pub error: Option<String>,
}

impl MockLanguageModel {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            version: "mock-1.0".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn predict(&self, text: &str) -> Result<String> {
        self.requests.lock().unwrap().push(text.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::prediction(error.clone()));
        }

        Ok(self.language.clone())
    }

    fn version(&self) -> &str {
        &self.version
    }
}
