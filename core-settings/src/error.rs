use core_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("A library sync is already in progress")]
    SyncInProgress,

    #[error("A settings submission is already in flight")]
    SubmitInProgress,

    #[error("Invalid value for field '{field}'")]
    InvalidField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
