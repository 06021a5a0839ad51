//! Error types for heatmap tile rendering.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Input Errors ===
    #[error("Invalid tile address {z}/{x}/{y}: {reason}")]
    InvalidTileAddress {
        z: u32,
        x: u32,
        y: u32,
        reason: String,
    },

    // === Persistence Errors ===
    #[error("Failed to persist tile: {0}")]
    Persistence(String),

    #[error("Failed to encode tile: {0}")]
    Encode(String),
}

impl HeatmapError {
    /// Whether the caller sent a bad request (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, HeatmapError::InvalidTileAddress { .. })
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HeatmapError::InvalidTileAddress { .. } => 400,
            HeatmapError::Persistence(_) | HeatmapError::Encode(_) => 500,
        }
    }
}

impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = HeatmapError::InvalidTileAddress {
            z: 1,
            x: 2,
            y: 0,
            reason: "x out of range".to_string(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert!(err.is_client_error());

        let err = HeatmapError::Persistence("disk full".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(!err.is_client_error());

        assert_eq!(HeatmapError::Encode("bad".into()).http_status_code(), 500);
    }

    #[test]
    fn test_io_error_maps_to_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: HeatmapError = io.into();
        assert!(matches!(err, HeatmapError::Persistence(_)));
        assert!(err.to_string().contains("denied"));
    }
}
