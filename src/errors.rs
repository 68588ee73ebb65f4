use crate::{download::DownloadError, video_id::ExtractError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}
