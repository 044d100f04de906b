use thiserror::Error;

/// Errors surfaced by the configuration editor and the message composer.
///
/// Every variant aborts the current action before any state is changed.
#[derive(Debug, Error)]
pub enum SmsError {
    /// One of base URL, port, username, password or serial number is empty.
    #[error("missing required gateway fields: {}", .0.join(", "))]
    MissingConfigFields(Vec<&'static str>),

    /// Recipient or message text is empty.
    #[error("recipient and message are required")]
    MissingRecipientOrMessage,

    /// No gateway configuration record has been stored yet.
    #[error("gateway is not configured")]
    NotConfigured,

    /// Reading, writing or parsing a storage document failed.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type SmsResult<T> = std::result::Result<T, SmsError>;
