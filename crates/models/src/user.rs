use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;
use validator::Validate;

use crate::errors::ModelError;
use crate::validation::{self, not_blank};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const USERNAME_MAX: usize = 64;
pub const USERNAME_TOO_LONG: &str = "Username must be at most 64 characters";

/// Sign-up payload as received from the client, password still in clear.
/// Missing fields deserialize as empty so they surface as violations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    #[validate(
        custom(function = "not_blank", message = "Username cannot be blank"),
        length(max = 64, message = "Username must be at most 64 characters")
    )]
    pub username: String,
    #[validate(
        custom(function = "not_blank", message = "Email cannot be blank"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(
        custom(function = "not_blank", message = "First name cannot be blank"),
        length(max = 128, message = "First name must be at most 128 characters")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "not_blank", message = "Last name cannot be blank"),
        length(max = 128, message = "Last name must be at most 128 characters")
    )]
    pub last_name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

impl NewUser {
    pub fn new(username: &str, email: &str, first_name: &str, last_name: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: password.to_string(),
        }
    }

    pub fn violations(&self) -> Vec<String> { validation::violations(self) }
}

/// Insert a user whose password has already been hashed.
pub async fn create(db: &DatabaseConnection, input: &NewUser, password_hash: String) -> Result<Model, ModelError> {
    validation::check(input)?;
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(input.username.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "user"))
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn exists_by_username(db: &DatabaseConnection, username: &str) -> Result<bool, ModelError> {
    Ok(find_by_username(db, username).await?.is_some())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Username)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_violation(u: &NewUser) -> String {
        let v = u.violations();
        assert_eq!(v.len(), 1, "expected exactly one violation, got {v:?}");
        v.into_iter().next().unwrap()
    }

    #[test]
    fn valid_user_has_no_violations() {
        let u = NewUser::new("Test", "test@ucll.be", "test", "test", "test123");
        assert!(u.violations().is_empty());
        assert_eq!(u.username, "Test");
        assert_eq!(u.email, "test@ucll.be");
        assert_eq!(u.password, "test123");
    }

    #[test]
    fn empty_username_is_rejected() {
        let u = NewUser::new("", "test@ucll.be", "test", "test", "test123");
        assert_eq!(only_violation(&u), "Username cannot be blank");
    }

    #[test]
    fn empty_first_name_is_rejected() {
        let u = NewUser::new("Test", "test@ucll.be", "", "test", "test123");
        assert_eq!(only_violation(&u), "First name cannot be blank");
    }

    #[test]
    fn empty_last_name_is_rejected() {
        let u = NewUser::new("Test", "test@ucll.be", "test", "", "test123");
        assert_eq!(only_violation(&u), "Last name cannot be blank");
    }

    #[test]
    fn empty_email_is_rejected() {
        let u = NewUser::new("Test", "", "test", "test", "test123");
        assert_eq!(only_violation(&u), "Email cannot be blank");
    }

    #[test]
    fn short_password_is_rejected() {
        let u = NewUser::new("Test", "test@ucll.be", "test", "test", "123");
        assert_eq!(only_violation(&u), "Password must be at least 6 characters long");
    }

    #[test]
    fn email_format_is_not_checked() {
        let u = NewUser::new("Test", "invalid-email", "test", "test", "test123");
        assert!(u.violations().is_empty());
    }

    #[test]
    fn signup_json_uses_camel_case() {
        let u: NewUser = serde_json::from_str(
            r#"{"username":"jdoe","email":"j@x.io","firstName":"John","lastName":"Doe","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(u.first_name, "John");
        assert!(u.violations().is_empty());
    }

    #[test]
    fn overlong_username_is_rejected() {
        let u = NewUser::new(&"a".repeat(65), "test@ucll.be", "test", "test", "test123");
        assert_eq!(only_violation(&u), USERNAME_TOO_LONG);
        let u = NewUser::new(&"a".repeat(64), "test@ucll.be", "test", "test", "test123");
        assert!(u.violations().is_empty());
    }

    #[test]
    fn missing_fields_become_violations() {
        let u: NewUser = serde_json::from_str(r#"{"username":"jdoe","email":"j@x.io","lastName":"Doe","password":"secret1"}"#).unwrap();
        assert_eq!(only_violation(&u), "First name cannot be blank");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let now = Utc::now().into();
        let m = Model {
            id: Uuid::new_v4(),
            username: "jdoe".into(),
            email: "j@x.io".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            password_hash: "$argon2id$v=19$...".into(),
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert!(v.get("passwordHash").is_none());
        assert_eq!(v["firstName"], "John");
    }
}
