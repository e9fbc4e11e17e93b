use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::base::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    JobSeeker,
    Recruiter,
    Admin,
}

impl UserRole {
    /// Admin acts as a wildcard for every role requirement.
    pub fn satisfies(self, required: UserRole) -> bool {
        self == required || self == UserRole::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl Entity for User {
    type Create = NewUser;
    type Update = UserPatch;
    const NAME: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewUser) -> Self {
        Self {
            id,
            email: fields.email,
            password_hash: fields.password_hash,
            role: fields.role,
            is_active: fields.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_every_role() {
        for role in [UserRole::JobSeeker, UserRole::Recruiter, UserRole::Admin] {
            assert!(UserRole::Admin.satisfies(role));
        }
    }

    #[test]
    fn roles_do_not_satisfy_each_other() {
        assert!(UserRole::Recruiter.satisfies(UserRole::Recruiter));
        assert!(!UserRole::Recruiter.satisfies(UserRole::JobSeeker));
        assert!(!UserRole::JobSeeker.satisfies(UserRole::Admin));
    }

    #[test]
    fn role_serializes_screaming_snake_case() {
        let raw = serde_json::to_string(&UserRole::JobSeeker).unwrap();
        assert_eq!(raw, "\"JOB_SEEKER\"");
    }
}
