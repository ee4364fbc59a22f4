use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::state::StateError;
use thiserror::Error;

pub type HoldTickResult<T> = std::result::Result<T, HoldTickError>;

#[derive(Debug, Error)]
pub enum HoldTickError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
