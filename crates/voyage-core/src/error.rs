//! Error type for the voyage core.
//!
//! Data-quality problems (unknown ports, bad dates, missing feeds) never
//! surface here; they fall back silently. Only caller mistakes and
//! document-level parse failures do.

/// Errors raised by the voyage core.
#[derive(Debug, thiserror::Error)]
pub enum VoyageError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid coordinates: lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("shipment not found: {0}")]
    ShipmentNotFound(String),

    #[error("shipment record has no id")]
    EmptyShipmentId,
}

pub type Result<T> = core::result::Result<T, VoyageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_values() {
        let err = VoyageError::InvalidCoordinates {
            lat: 91.0,
            lng: 0.0,
        };
        assert!(err.to_string().contains("lat=91"));
    }

    #[test]
    fn json_errors_convert() {
        let parse: core::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: VoyageError = parse.unwrap_err().into();
        assert!(matches!(err, VoyageError::Json(_)));
    }
}
