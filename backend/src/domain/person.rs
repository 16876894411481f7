//! Person entity: a pilgrimage participant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pilgrimage participant.
///
/// ## Invariants
/// - `id` is assigned by the store on creation and never altered by a patch,
///   even when a patch document supplies an `id` key.
///
/// The name and birth date are optional end to end because the merge and
/// operation patch strategies can clear them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Identity. Defaults when absent from a patched JSON document; the
    /// service forces it back to the addressed id before persisting.
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Field values for a person that does not yet have an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Person {
    /// Combine a store-assigned id with draft fields.
    pub fn from_draft(id: i64, draft: PersonDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            birth_date: draft.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_form_is_camel_case() {
        let person = Person {
            id: 1,
            first_name: Some("John".to_owned()),
            last_name: Some("Doe".to_owned()),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
        };
        let value = serde_json::to_value(&person).expect("serialises");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "firstName": "John",
                "lastName": "Doe",
                "birthDate": "1990-01-01",
            })
        );
    }

    #[test]
    fn missing_fields_deserialize_as_defaults() {
        let person: Person = serde_json::from_value(json!({ "firstName": "Ada" }))
            .expect("partial document deserialises");
        assert_eq!(person.id, 0);
        assert_eq!(person.first_name.as_deref(), Some("Ada"));
        assert_eq!(person.last_name, None);
        assert_eq!(person.birth_date, None);
    }
}
