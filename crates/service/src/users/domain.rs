use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ServiceError;

/// A stored user record. Serialized as `{"id", "name", "email"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Build a record under a freshly generated id.
    pub fn new(input: CreateUserInput) -> Self {
        Self { id: new_user_id(), name: input.name, email: input.email }
    }
}

/// Body of `POST /user`. Both fields must be present and be strings;
/// their contents are not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

impl CreateUserInput {
    /// Decode a JSON object body. Repeated keys resolve to the last value
    /// and unknown keys are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, ServiceError> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(mut fields) = value else {
            return Err(ServiceError::MalformedInput("request body must be a JSON object".into()));
        };
        Ok(Self {
            name: take_string(&mut fields, "name")?,
            email: take_string(&mut fields, "email")?,
        })
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Result<String, ServiceError> {
    match fields.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ServiceError::MalformedInput(format!("field `{key}` must be a string"))),
        None => Err(ServiceError::MalformedInput(format!("missing field `{key}`"))),
    }
}

/// Response of a successful create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedUser {
    pub id: String,
}

/// 128-bit random id in canonical hyphenated form.
pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_canonical_uuids() {
        let id = new_user_id();
        assert_eq!(id.len(), 36);
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, new_user_id());
    }

    #[test]
    fn empty_strings_are_accepted() {
        let input = CreateUserInput::from_json(br#"{"name":"","email":""}"#).unwrap();
        let user = User::new(input);
        assert!(user.name.is_empty());
        assert!(user.email.is_empty());
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let err = CreateUserInput::from_json(br#"{"name":1,"email":"a@b"}"#).unwrap_err();
        assert_eq!(err, ServiceError::MalformedInput("field `name` must be a string".into()));
        assert!(CreateUserInput::from_json(br#"{"name":"a","email":null}"#).is_err());
    }

    #[test]
    fn missing_field_is_named() {
        let err = CreateUserInput::from_json(br#"{"name":"Ada"}"#).unwrap_err();
        assert_eq!(err, ServiceError::MalformedInput("missing field `email`".into()));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in [&b"[]"[..], &b"\"Ada\""[..], &b"null"[..], &b"{"[..], &b""[..]] {
            assert!(matches!(CreateUserInput::from_json(body), Err(ServiceError::MalformedInput(_))));
        }
    }

    #[test]
    fn repeated_keys_take_the_last_value() {
        let input = CreateUserInput::from_json(br#"{"name":"a","name":"b","email":"x"}"#).unwrap();
        assert_eq!(input, CreateUserInput { name: "b".into(), email: "x".into() });
    }

    #[test]
    fn extra_fields_are_ignored() {
        let input = CreateUserInput::from_json(br#"{"name":"Ada","email":"ada@example.com","id":"mine"}"#).unwrap();
        let user = User::new(input);
        assert_ne!(user.id, "mine");
    }
}
