use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid perspective: {0}")]
    InvalidPerspective(String),

    #[error("KPI '{name}' already exists under '{perspective}'")]
    DuplicateIndicator { perspective: String, name: String },

    #[error("KPI '{name}' not found under '{perspective}'")]
    NotFound { perspective: String, name: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors that reject a single request without leaving the
    /// store or the process in a bad state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::InvalidPerspective(_)
                | AppError::DuplicateIndicator { .. }
                | AppError::NotFound { .. }
                | AppError::InvalidInput(_)
        )
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    Cancelled(String),
    Success(String),
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::InvalidPerspective(_) | AppError::InvalidInput(_) => {
            eprintln!("❗ {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::DuplicateIndicator { .. } | AppError::NotFound { .. } => {
            eprintln!("⚠️  {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::Storage(msg) => {
            eprintln!("❌ {}", OutputStyle::error(&format!("Storage: {}", msg)));
        }
        AppError::Config(msg) => {
            eprintln!("❌ {}", OutputStyle::error(&format!("Config: {}", msg)));
        }
        AppError::Io(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}
