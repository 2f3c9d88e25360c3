use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role of an authenticated account, stored upper-case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Agent,
}

impl UserRole {
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Agent => "AGENT",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "AGENT" => Some(Self::Agent),
            _ => None,
        }
    }
}

/// Public account information for the logged-in user
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl UserDto {
    pub fn from_model(model: &entity::agent_user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
            role: UserRole::from_stored(&model.role).unwrap_or_default(),
        }
    }
}

/// Credential login request body
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_between_stored_and_wire_form() {
        let role = UserRole::from_stored("ADMIN").unwrap();

        assert_eq!(role, UserRole::Admin);
        assert_eq!(serde_json::to_value(role).unwrap(), "admin");
        assert_eq!(role.as_stored(), "ADMIN");
    }

    #[test]
    fn unknown_role_falls_back_to_agent() {
        assert!(UserRole::from_stored("OWNER").is_none());
        assert_eq!(UserRole::default(), UserRole::Agent);
    }
}
