use thiserror::Error;

use crate::application::api::ApiError;
use crate::config::ConfigError;
use crate::infra::error::InfraError;

/// Top-level error surfaced to console embedders.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    /// True when the backend answered 404 for the requested entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_not_found())
    }
}
