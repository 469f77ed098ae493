use thiserror::Error;

/// Errors raised while loading the catalog or the configuration.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog source returned HTTP {status}")]
    Status { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Http(e) => format!("Network error: {}", e),
            CatalogError::Status { status } => {
                format!("Catalog source answered with HTTP {}", status)
            }
            CatalogError::Io(e) => format!("File system error: {}", e),
            CatalogError::Json(e) => format!("Catalog is not valid movie JSON: {}", e),
            CatalogError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_user_message() {
        let error = CatalogError::Status { status: 404 };
        assert!(error.user_message().contains("404"));
    }

    #[test]
    fn test_json_error_from() {
        let parse = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let error: CatalogError = parse.into();
        assert!(matches!(error, CatalogError::Json(_)));
        assert!(error.user_message().starts_with("Catalog is not valid movie JSON"));
    }

    #[test]
    fn test_config_display() {
        let error = CatalogError::Config("bad field".to_string());
        assert_eq!(error.to_string(), "Configuration error: bad field");
    }
}
