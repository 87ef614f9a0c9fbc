//! Error types for trace normalization and the JSON/GPX boundaries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraceError>;

#[derive(Debug, Error)]
pub enum TraceError {
    /// A fix whose coordinates could not be turned into finite numbers.
    #[error("invalid point at index {index}: {field} {reason}")]
    InvalidPoint {
        index: usize,
        field: &'static str,
        reason: String,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GPX parse error: {0}")]
    Gpx(#[from] ::gpx::errors::GpxError),
}

impl TraceError {
    pub(crate) fn invalid_point(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        TraceError::InvalidPoint {
            index,
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_point_display_names_index_and_field() {
        let err = TraceError::invalid_point(3, "latitude", "is not a number");
        let text = err.to_string();
        assert!(text.contains("index 3"));
        assert!(text.contains("latitude is not a number"));
    }

    #[test]
    fn gpx_error_keeps_source() {
        use std::error::Error as _;

        let err: TraceError = ::gpx::read(&b"<gpx"[..]).unwrap_err().into();
        assert!(matches!(err, TraceError::Gpx(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn json_error_converts() {
        let err: TraceError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, TraceError::Json(_)));
    }
}
