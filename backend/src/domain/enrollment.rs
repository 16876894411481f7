//! Enrollment entity: one person enrolled in one pilgrimage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an enrollment. Wire form is uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enrollment status: {value}")]
pub struct ParseEnrollmentStatusError {
    pub value: String,
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = ParseEnrollmentStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseEnrollmentStatusError {
                value: raw.to_owned(),
            }),
        }
    }
}

/// One person enrolled in one pilgrimage.
///
/// ## Invariants
/// - At most one enrollment exists per (person, pilgrimage) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i64,
    pub person_id: i64,
    pub pilgrimage_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
}

/// Field values for an enrollment that does not yet have an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub person_id: i64,
    pub pilgrimage_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
}

impl Enrollment {
    /// Combine a store-assigned id with draft fields.
    pub fn from_draft(id: i64, draft: EnrollmentDraft) -> Self {
        Self {
            id,
            person_id: draft.person_id,
            pilgrimage_id: draft.pilgrimage_id,
            enrolled_at: draft.enrolled_at,
            status: draft.status,
            notes: draft.notes,
        }
    }
}

/// Overlay update for an enrollment: non-null fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentUpdate {
    pub status: Option<EnrollmentStatus>,
    pub notes: Option<String>,
}

/// Enrollment joined with the display names of its person and pilgrimage,
/// the shape the REST surface returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentView {
    pub id: i64,
    pub person_id: i64,
    pub person_name: String,
    pub pilgrimage_id: i64,
    pub pilgrimage_name: String,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PENDING", EnrollmentStatus::Pending)]
    #[case("pending", EnrollmentStatus::Pending)]
    #[case("Confirmed", EnrollmentStatus::Confirmed)]
    #[case("CANCELLED", EnrollmentStatus::Cancelled)]
    #[case("completed", EnrollmentStatus::Completed)]
    fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: EnrollmentStatus) {
        assert_eq!(raw.parse::<EnrollmentStatus>(), Ok(expected));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "ARCHIVED"
            .parse::<EnrollmentStatus>()
            .expect_err("unknown status");
        assert_eq!(err.value, "ARCHIVED");
    }

    #[test]
    fn status_serializes_uppercase() {
        let value = serde_json::to_value(EnrollmentStatus::Pending).expect("serialises");
        assert_eq!(value, serde_json::json!("PENDING"));
    }
}
