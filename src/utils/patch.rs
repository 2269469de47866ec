use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// ===============================
/// Build a partial update body
/// ===============================
///
/// Serializes `payload` and keeps only the fields that carry a value, so a
/// PATCH never overwrites server data with `null`.
pub fn build_patch_body<T: Serialize>(payload: &T) -> Result<Value, ValidationError> {
    let value = serde_json::to_value(payload)
        .map_err(|e| ValidationError::new("payload", e.to_string()))?;

    let Value::Object(obj) = value else {
        return Err(ValidationError::new("payload", "Payload must be a JSON object"));
    };

    let fields: Map<String, Value> = obj
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .filter(|(_, v)| !matches!(v, Value::String(s) if s.trim().is_empty()))
        .collect();

    if fields.is_empty() {
        return Err(ValidationError::new("payload", "No fields provided for update"));
    }

    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::UpdateEmployee;

    #[test]
    fn only_provided_fields_are_sent() {
        let update = UpdateEmployee {
            full_name: Some("Siti Rahma".into()),
            phone: Some("  ".into()),
            ..Default::default()
        };
        let body = build_patch_body(&update).unwrap();
        assert_eq!(body, serde_json::json!({"full_name": "Siti Rahma"}));
    }

    #[test]
    fn empty_update_is_refused() {
        let err = build_patch_body(&UpdateEmployee::default()).unwrap_err();
        assert_eq!(err.message, "No fields provided for update");
    }

    #[test]
    fn non_object_payload_is_refused() {
        let err = build_patch_body(&vec![1, 2]).unwrap_err();
        assert_eq!(err.message, "Payload must be a JSON object");
    }
}
