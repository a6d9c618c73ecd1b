use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("App not on the {page} page")]
    NotOnPage { page: String },

    #[error("Timed out after {} seconds waiting for {condition}", .timeout.as_secs())]
    Timeout { condition: String, timeout: Duration },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Stale element: {0}")]
    StaleElement(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    Anyhow(String),
}

pub type Result<T> = std::result::Result<T, PageError>;

// Convert anyhow::Error to PageError
impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        PageError::Anyhow(err.to_string())
    }
}

impl PageError {
    pub fn not_on_page(page: &str) -> Self {
        PageError::NotOnPage {
            page: page.to_string(),
        }
    }

    /// Helper for driver implementations wrapping foreign errors.
    pub fn from_driver_error<E: std::fmt::Display>(err: E) -> Self {
        PageError::Driver(err.to_string())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PageError::Timeout { .. })
    }

    /// Lookup failures a UI in transition produces; waits poll through them.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PageError::ElementNotFound(_) | PageError::StaleElement(_)
        )
    }
}
