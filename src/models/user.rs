use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by `POST /users` and `PUT /users/{id}`.
///
/// Decoded with the same shape as [`User`], but leniently: absent or `null`
/// fields fall back to their empty value. `id` and `created_at` must still
/// have the right type if present, and are then ignored since the store owns
/// both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// `null` leaves a string field at its empty value
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_created_at_as_rfc3339() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let user = User {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "alice@example.com");
        assert_eq!(value["created_at"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_user_request_accepts_full_entity() {
        let request: UserRequest = serde_json::from_str(
            r#"{"id": 99, "name": "Bob", "email": "bob@example.com", "created_at": "2024-05-01T12:30:00Z"}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Bob");
        assert_eq!(request.email, "bob@example.com");
        assert_eq!(request.id, Some(99));
    }

    #[test]
    fn test_user_request_missing_and_null_fields_are_empty() {
        let request: UserRequest = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert_eq!(request.name, "Bob");
        assert_eq!(request.email, "");

        let request: UserRequest =
            serde_json::from_str(r#"{"name": null, "email": null, "id": null, "created_at": null}"#)
                .unwrap();
        assert_eq!(request, UserRequest::default());
    }

    #[test]
    fn test_user_request_rejects_mistyped_fields() {
        assert!(serde_json::from_str::<UserRequest>(r#"{"id": "seven"}"#).is_err());
        assert!(serde_json::from_str::<UserRequest>(r#"{"id": 1.5}"#).is_err());
        assert!(serde_json::from_str::<UserRequest>(r#"{"created_at": "whenever"}"#).is_err());
        assert!(serde_json::from_str::<UserRequest>(r#"{"name": 5}"#).is_err());
        assert!(serde_json::from_str::<UserRequest>(r#""Bob""#).is_err());
    }
}
