use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("content record not found")]
    MissingRecord,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("save failed{}: {message}", status_suffix(.status))]
    SaveFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn save_failure(status: Option<u16>, message: impl Into<String>) -> Self {
        CoreError::SaveFailure {
            status,
            message: message.into(),
        }
    }

    /// Whether the edit view should switch to its "not found" state.
    pub fn is_missing_record(&self) -> bool {
        matches!(self, CoreError::MissingRecord)
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
