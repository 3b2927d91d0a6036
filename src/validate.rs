//! Request-body validation.
//!
//! Two styles, both carried over from the legacy service:
//!
//! * Item bodies use blank-field reporting: every missing or unusable
//!   required field is reported in the same response, keyed by field name
//!   under `message`. Validation never stops at the first failure.
//! * User bodies use schema-style reporting: `{field: [errors...]}`.

use std::collections::BTreeMap;

use serde_json::Value;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NOT_A_STRING: &str = "Not a valid string.";

/// Validated item payload.
#[derive(Debug, PartialEq)]
pub struct ItemPayload {
    pub price: f64,
    pub store_id: i64,
}

/// Validated user payload (registration and login share the schema).
#[derive(Debug, PartialEq)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
}

fn blank_field(name: &str) -> String {
    format!("'{name}' cannot be blank.")
}

/// Validate an item body: `price` (float) and `store_id` (int) are both
/// required. All failures are collected before returning.
pub fn item_payload(body: &Value) -> Result<ItemPayload, BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    let price = body.get("price").and_then(Value::as_f64);
    if price.is_none() {
        errors.insert("price".to_string(), blank_field("price"));
    }

    let store_id = body.get("store_id").and_then(Value::as_i64);
    if store_id.is_none() {
        errors.insert("store_id".to_string(), blank_field("store_id"));
    }

    if errors.is_empty() {
        Ok(ItemPayload {
            price: price.unwrap_or_default(),
            store_id: store_id.unwrap_or_default(),
        })
    } else {
        Err(errors)
    }
}

/// Validate a user body against the schema: `username` and `password` are
/// required strings. Errors are keyed by field, each carrying a list of
/// messages.
pub fn user_payload(body: &Value) -> Result<UserPayload, BTreeMap<String, Vec<String>>> {
    let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let username = string_field(body, "username", &mut errors);
    let password = string_field(body, "password", &mut errors);

    if errors.is_empty() {
        Ok(UserPayload {
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    } else {
        Err(errors)
    }
}

fn string_field(
    body: &Value,
    name: &str,
    errors: &mut BTreeMap<String, Vec<String>>,
) -> Option<String> {
    match body.get(name) {
        None | Some(Value::Null) => {
            errors.insert(name.to_string(), vec![MISSING_FIELD.to_string()]);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.insert(name.to_string(), vec![NOT_A_STRING.to_string()]);
            None
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_payload_valid() {
        let body = json!({"price": 19.99, "store_id": 1});
        let payload = item_payload(&body).unwrap();
        assert_eq!(payload.price, 19.99);
        assert_eq!(payload.store_id, 1);
    }

    #[test]
    fn test_item_payload_integer_price_accepted() {
        let body = json!({"price": 5, "store_id": 2});
        assert_eq!(item_payload(&body).unwrap().price, 5.0);
    }

    #[test]
    fn test_item_payload_reports_all_missing_fields() {
        let errors = item_payload(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["price"], "'price' cannot be blank.");
        assert_eq!(errors["store_id"], "'store_id' cannot be blank.");
    }

    #[test]
    fn test_item_payload_reports_single_missing_field() {
        let errors = item_payload(&json!({"price": 1.0})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("store_id"));
    }

    #[test]
    fn test_item_payload_wrong_type_treated_as_blank() {
        let errors = item_payload(&json!({"price": "cheap", "store_id": 1})).unwrap_err();
        assert_eq!(errors["price"], "'price' cannot be blank.");
    }

    #[test]
    fn test_user_payload_valid() {
        let body = json!({"username": "alice", "password": "hunter2"});
        let payload = user_payload(&body).unwrap();
        assert_eq!(payload.username, "alice");
        assert_eq!(payload.password, "hunter2");
    }

    #[test]
    fn test_user_payload_missing_fields() {
        let errors = user_payload(&json!({})).unwrap_err();
        assert_eq!(errors["username"], vec![MISSING_FIELD]);
        assert_eq!(errors["password"], vec![MISSING_FIELD]);
    }

    #[test]
    fn test_user_payload_non_string_field() {
        let errors = user_payload(&json!({"username": 42, "password": "x"})).unwrap_err();
        assert_eq!(errors["username"], vec![NOT_A_STRING]);
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_user_payload_empty_password_passes_schema() {
        // Emptiness is checked by the registration handler, not the schema.
        let payload = user_payload(&json!({"username": "a", "password": ""})).unwrap();
        assert_eq!(payload.password, "");
    }
}
