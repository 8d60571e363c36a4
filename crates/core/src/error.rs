#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to encode value: {0}")]
    Encoding(serde_json::Error),
    #[error("failed to decode value: {0}")]
    Decoding(serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field '{key}' is not {expected} (found {found})")]
    FieldType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
