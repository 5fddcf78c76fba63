//! User: a professional enrolled on the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;
const AREA_MAX: usize = 100;
const CAREER_LEVEL_MAX: usize = 50;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across all users
    pub email: String,
    pub area: String,
    pub career_level: String,
    /// Assigned by the store on insert
    pub registered_at: DateTime<Utc>,
}

/// Validated input for a user insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub area: String,
    pub career_level: String,
}

/// Fields to overlay on an existing user. `None` leaves the field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub area: Option<String>,
    pub career_level: Option<String>,
}

impl User {
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(area) = changes.area {
            self.area = area;
        }
        if let Some(career_level) = changes.career_level {
            self.career_level = career_level;
        }
    }
}

/// POST /usuarios body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "area_atuacao")]
    pub area: String,
    #[serde(default, rename = "nivel_carreira")]
    pub career_level: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        validation::required_text("nome", &self.name, NAME_MIN, NAME_MAX)?;
        validation::email("email", &self.email)?;
        validation::max_text("area_atuacao", &self.area, AREA_MAX)?;
        validation::max_text("nivel_carreira", &self.career_level, CAREER_LEVEL_MAX)?;

        Ok(NewUser {
            name: self.name,
            email: self.email,
            area: self.area,
            career_level: self.career_level,
        })
    }
}

/// PUT /usuarios/{id} body. Email is immutable once registered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "area_atuacao")]
    pub area: Option<String>,
    #[serde(default, rename = "nivel_carreira")]
    pub career_level: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, ValidationError> {
        let changes = UserChanges {
            name: validation::non_empty(self.name),
            area: validation::non_empty(self.area),
            career_level: validation::non_empty(self.career_level),
        };

        if let Some(name) = &changes.name {
            validation::bounded_text("nome", name, NAME_MIN, NAME_MAX)?;
        }
        if let Some(area) = &changes.area {
            validation::max_text("area_atuacao", area, AREA_MAX)?;
        }
        if let Some(level) = &changes.career_level {
            validation::max_text("nivel_carreira", level, CAREER_LEVEL_MAX)?;
        }

        Ok(changes)
    }
}

/// User representation returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(
        rename = "area_atuacao",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub area: String,
    #[serde(
        rename = "nivel_carreira",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub career_level: String,
    #[serde(rename = "data_cadastro")]
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            area: u.area,
            career_level: u.career_level,
            registered_at: u.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_create() {
        let new = create("Ana", "ana@x.com").validate().unwrap();
        assert_eq!(new.name, "Ana");
        assert_eq!(new.email, "ana@x.com");
        assert!(new.area.is_empty());
    }

    #[test]
    fn create_requires_name_and_email() {
        assert_eq!(
            create("", "ana@x.com").validate().unwrap_err(),
            ValidationError::Empty { field: "nome" }
        );
        assert_eq!(
            create("Ana", "").validate().unwrap_err(),
            ValidationError::Empty { field: "email" }
        );
    }

    #[test]
    fn create_rejects_short_name_and_bad_email() {
        assert!(matches!(
            create("An", "ana@x.com").validate(),
            Err(ValidationError::TooShort { field: "nome", .. })
        ));
        assert!(matches!(
            create("Ana", "not-an-email").validate(),
            Err(ValidationError::InvalidFormat { field: "email", .. })
        ));
    }

    #[test]
    fn update_treats_empty_as_unset() {
        let changes = UpdateUserRequest {
            name: Some(String::new()),
            area: Some("Dados".into()),
            career_level: None,
        }
        .validate()
        .unwrap();

        assert_eq!(
            changes,
            UserChanges {
                name: None,
                area: Some("Dados".into()),
                career_level: None,
            }
        );
    }

    #[test]
    fn update_validates_present_fields() {
        let err = UpdateUserRequest {
            name: Some("Al".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { field: "nome", .. }));
    }

    #[test]
    fn apply_overlays_only_given_fields() {
        let mut user = User {
            id: 1,
            name: "Ana".into(),
            email: "ana@x.com".into(),
            area: "TI".into(),
            career_level: "Pleno".into(),
            registered_at: Utc::now(),
        };
        user.apply(UserChanges {
            career_level: Some("Senior".into()),
            ..Default::default()
        });

        assert_eq!(user.name, "Ana");
        assert_eq!(user.area, "TI");
        assert_eq!(user.career_level, "Senior");
    }

    #[test]
    fn response_omits_empty_optional_text() {
        let response = UserResponse::from(User {
            id: 7,
            name: "Ana".into(),
            email: "ana@x.com".into(),
            area: String::new(),
            career_level: String::new(),
            registered_at: Utc::now(),
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["nome"], "Ana");
        assert!(json.get("area_atuacao").is_none());
        assert!(json.get("nivel_carreira").is_none());
        assert!(json.get("data_cadastro").is_some());
    }
}
