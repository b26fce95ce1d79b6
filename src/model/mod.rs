mod preprocess;
mod profile;

pub use preprocess::preprocess;
pub use profile::{LanguageProfile, ProfileModel};

use crate::{Result, config::ModelConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A classifier mapping free text to a language name.
///
/// Handlers only ever see this trait, so any model can sit behind the API.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn predict(&self, text: &str) -> Result<String>;

    fn version(&self) -> &str;
}

/// Builds the model described by the configuration. Called once at startup.
pub async fn from_config(config: &ModelConfig) -> Result<Arc<dyn LanguageModel>> {
    let model = match &config.profiles_path {
        Some(path) => {
            info!("Loading language profiles from: {}", path);
            ProfileModel::from_file(path, &config.version, &config.fallback).await?
        }
        None => ProfileModel::builtin(&config.version, &config.fallback),
    };

    info!(
        "Language model {} ready with {} word profiles",
        model.version(),
        model.profile_count()
    );

    Ok(Arc::new(model))
}
