//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LogError>;

/// Failures surfaced by the pipeline.
///
/// Configuration problems appear once at build time and are never
/// retried here. Malformed call-site input is deliberately absent: it
/// degrades to diagnostic fields instead of erroring. Sink failures pass
/// through `write`/`sync` untouched; retry policy belongs to the sink.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding name not recognized at configuration time
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Output path could not be opened at configuration time
    #[error("cannot open sink '{path}': {source}")]
    Sink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Flush failure reported by one or more sinks
    #[error("sync failed: {0}")]
    Sync(String),
}

impl LogError {
    /// Create a sink open error carrying the offending path.
    pub fn sink(path: impl Into<String>, source: std::io::Error) -> Self {
        LogError::Sink {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::UnsupportedEncoding("xml".to_string());
        assert_eq!(err.to_string(), "unsupported encoding: xml");

        let err = LogError::config("sampler", "rate out of range");
        assert_eq!(
            err.to_string(),
            "invalid configuration for sampler: rate out of range"
        );
    }

    #[test]
    fn test_sink_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LogError::sink("/var/log/app.log", io);
        assert!(err.to_string().contains("/var/log/app.log"));
        assert!(matches!(err, LogError::Sink { .. }));
    }
}
