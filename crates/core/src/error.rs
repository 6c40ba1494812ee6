#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid record key: {0}")]
    InvalidKey(#[from] triage_types::KeyError),
}

pub type TriageResult<T> = std::result::Result<T, ProtocolError>;
