//! Input checks shared by the configuration editor, the composer and the storage layer.
//!
//! Form validation is deliberately shallow: a field is either present or it is not.
//! URL scheme, port range and serial number shape are passed through untouched.

/// Errors raised while turning a stored document back into typed data.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document exceeds size limit ({limit} bytes)")]
    FileSizeExceeded { limit: usize },

    #[error("invalid document format: {0}")]
    InvalidFormat(String),
}

/// A form field counts as filled when it holds something other than whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Drop control characters from composed message text, keeping newlines and tabs.
pub fn sanitize_message_text(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

/// Reject a document before reading it when it is larger than `max_size`.
pub fn validate_file_size(size: u64, max_size: u64) -> Result<(), DocumentError> {
    if size > max_size {
        return Err(DocumentError::FileSizeExceeded {
            limit: max_size as usize,
        });
    }
    Ok(())
}

/// Parse a JSON document with a size cap.
///
/// Leading NUL bytes left behind by an interrupted write are stripped first;
/// valid JSON never starts with one.
pub fn secure_json_parse<T>(content: &str, max_bytes: usize) -> Result<T, DocumentError>
where
    T: serde::de::DeserializeOwned,
{
    if content.len() > max_bytes {
        return Err(DocumentError::FileSizeExceeded { limit: max_bytes });
    }
    let normalized = content.trim_start_matches('\0');
    serde_json::from_str(normalized).map_err(|e| DocumentError::InvalidFormat(e.to_string()))
}
