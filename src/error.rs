use crate::geocode::GeocodeError;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of an [`Error`], used by callers that only care
/// about the category of failure (exit codes, retry decisions, reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Out-of-range or malformed input.
    Validation,
    /// Unrecognized mode, lease-term label or unit-type name.
    UnknownVariant,
    /// Geocoding timeout, miss or service error.
    ExternalService,
    /// A stored record failed to parse on load.
    PersistenceCorruption,
    /// The listing store could not be read or written.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid input for {factor} score: {reason}")]
    InvalidInput { factor: &'static str, reason: String },

    #[error("invalid distance {distance} for '{mode}': not a valid number of miles")]
    InvalidDistance { mode: String, distance: f64 },

    #[error("no valid travel modes in distances (expected walk, bike, drive or bus)")]
    NoValidModes,

    #[error("unknown travel mode '{0}' (expected walk, bike, drive or bus)")]
    InvalidMode(String),

    #[error("unknown lease term '{0}' (expected Month-to-Month, 6 Months or 12 Months)")]
    UnknownLeaseTerm(String),

    #[error("unknown property type '{0}'")]
    UnknownPropertyType(String),

    #[error("geocoding failed for '{address}': {source}")]
    GeocodingFailure {
        address: String,
        #[source]
        source: GeocodeError,
    },

    #[error("corrupt listing record at row {row}, field '{field}': {reason}")]
    PersistenceCorruption {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("listing store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. }
            | Error::InvalidInput { .. }
            | Error::InvalidDistance { .. }
            | Error::NoValidModes => ErrorKind::Validation,
            Error::InvalidMode(_) | Error::UnknownLeaseTerm(_) | Error::UnknownPropertyType(_) => {
                ErrorKind::UnknownVariant
            }
            Error::GeocodingFailure { .. } => ErrorKind::ExternalService,
            Error::PersistenceCorruption { .. } => ErrorKind::PersistenceCorruption,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::validation("rent", "must be positive").kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::NoValidModes.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::InvalidMode("teleport".to_string()).kind(),
            ErrorKind::UnknownVariant
        );
        assert_eq!(
            Error::UnknownPropertyType("5x5".to_string()).kind(),
            ErrorKind::UnknownVariant
        );
        assert_eq!(
            Error::GeocodingFailure {
                address: "1 Nowhere Rd".to_string(),
                source: GeocodeError::NotFound,
            }
            .kind(),
            ErrorKind::ExternalService
        );
    }

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = Error::PersistenceCorruption {
            row: 3,
            field: "Overall Score",
            reason: "'TEN' is not a number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("Overall Score"));
        assert!(msg.contains("TEN"));
    }
}
