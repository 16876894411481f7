//! Partial-update engine for [`Person`].
//!
//! Three strategies coexist, selected by route in the HTTP adapter:
//!
//! - JSON Merge Patch (RFC 7386) over the entity's JSON representation;
//! - an ordered list of path-addressed operations (`replace`/`add`/`remove`);
//! - a field overlay where non-null fields overwrite and null means
//!   "no change".
//!
//! The functions here are pure; [`crate::domain::PersonService`] wraps them
//! in the load → mutate → persist flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::error::Error;
use super::person::Person;

/// One path-addressed edit operation.
///
/// `copy`, `move`, and `test` are declared by the wire format but have no
/// semantics here; they surface as unsupported operations. `from` exists for
/// those declared ops and is parsed but never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatchOperation {
    /// Operation name, matched case-insensitively.
    #[schema(example = "replace")]
    pub op: String,
    /// Fixed-field pointer: `/firstName`, `/lastName`, or `/birthDate`.
    #[serde(default)]
    #[schema(example = "/firstName")]
    pub path: String,
    /// New value for `replace`/`add`. Null or absent clears the field.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    /// Source pointer for the declared-but-unimplemented `copy`/`move` ops.
    #[serde(default)]
    pub from: Option<String>,
}

/// Field overlay: present fields overwrite, null or absent fields are
/// untouched. This strategy can never clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonFieldOverlay {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

const FIRST_NAME_PATH: &str = "/firstName";
const LAST_NAME_PATH: &str = "/lastName";
const BIRTH_DATE_PATH: &str = "/birthDate";

/// Apply an RFC 7386 merge patch at the top level of `target`.
///
/// Null patch values remove keys, non-null values overwrite, absent keys are
/// untouched. Nested objects and arrays are replaced wholesale, not
/// deep-merged. A non-object patch replaces the target wholesale.
pub fn apply_merge_patch(target: Value, patch: &Value) -> Value {
    let Value::Object(patch_fields) = patch else {
        return patch.clone();
    };
    let Value::Object(mut fields) = target else {
        return patch.clone();
    };

    for (key, value) in patch_fields {
        if value.is_null() {
            fields.remove(key);
        } else {
            fields.insert(key.clone(), value.clone());
        }
    }

    Value::Object(fields)
}

/// Apply one operation to an in-memory person.
///
/// `add` degenerates to `replace`: the entity has no collection-valued
/// fields. Unknown ops fail with an unsupported-operation error naming the
/// op; unknown paths fail with an invalid-path error naming the path.
pub fn apply_operation(person: &mut Person, operation: &PatchOperation) -> Result<(), Error> {
    match operation.op.to_lowercase().as_str() {
        "replace" | "add" => apply_replace(person, operation),
        "remove" => apply_remove(person, operation),
        other => Err(
            Error::unsupported_operation(format!("unsupported operation: {other}"))
                .with_details(json!({ "op": operation.op })),
        ),
    }
}

/// Apply a field overlay: only present fields overwrite.
pub fn apply_overlay(person: &mut Person, overlay: &PersonFieldOverlay) {
    if let Some(first_name) = &overlay.first_name {
        person.first_name = Some(first_name.clone());
    }
    if let Some(last_name) = &overlay.last_name {
        person.last_name = Some(last_name.clone());
    }
    if let Some(birth_date) = overlay.birth_date {
        person.birth_date = Some(birth_date);
    }
}

fn apply_replace(person: &mut Person, operation: &PatchOperation) -> Result<(), Error> {
    match operation.path.as_str() {
        FIRST_NAME_PATH => {
            person.first_name = string_value(operation, "firstName")?;
            Ok(())
        }
        LAST_NAME_PATH => {
            person.last_name = string_value(operation, "lastName")?;
            Ok(())
        }
        BIRTH_DATE_PATH => {
            // A null date value is a no-op; `remove` is the way to clear it.
            if let Some(date) = date_value(operation)? {
                person.birth_date = Some(date);
            }
            Ok(())
        }
        other => Err(invalid_path_error("replace", other)),
    }
}

fn apply_remove(person: &mut Person, operation: &PatchOperation) -> Result<(), Error> {
    match operation.path.as_str() {
        FIRST_NAME_PATH => {
            person.first_name = None;
            Ok(())
        }
        LAST_NAME_PATH => {
            person.last_name = None;
            Ok(())
        }
        BIRTH_DATE_PATH => {
            person.birth_date = None;
            Ok(())
        }
        other => Err(invalid_path_error("remove", other)),
    }
}

fn invalid_path_error(op: &str, path: &str) -> Error {
    Error::invalid_request(format!("invalid path for {op}: {path}"))
        .with_details(json!({ "path": path, "code": "invalid_path" }))
}

fn string_value(operation: &PatchOperation, field: &str) -> Result<Option<String>, Error> {
    match &operation.value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(
            Error::invalid_request(format!("{field} value must be a string")).with_details(
                json!({ "field": field, "value": other.clone(), "code": "invalid_value" }),
            ),
        ),
    }
}

/// Accept either an ISO date string or an already-structured date value.
fn date_value(operation: &PatchOperation) -> Result<Option<NaiveDate>, Error> {
    match &operation.value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value::<NaiveDate>(value.clone())
            .map(Some)
            .map_err(|_| {
                Error::invalid_request("birthDate value must be an ISO calendar date")
                    .with_details(json!({
                        "field": "birthDate",
                        "value": value.clone(),
                        "code": "invalid_value",
                    }))
            }),
    }
}
