use crate::dto::auth_dto::UpdateUserPayload;
use crate::error::{Error, Result};
use crate::models::user::{User, UserPatch, UserRole};
use crate::repositories::{Entity, Store};
use crate::utils::crypto;

#[derive(Clone)]
pub struct UserService {
    store: Store,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.store
            .users
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(User::NAME))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        self.store.users.list(offset, limit).await
    }

    /// Self-service update. Role and active flag need an admin.
    pub async fn update(
        &self,
        actor: &User,
        target_id: i64,
        payload: UpdateUserPayload,
    ) -> Result<User> {
        let privileged = payload.role.is_some() || payload.is_active.is_some();
        if privileged && actor.role != UserRole::Admin {
            return Err(Error::Forbidden(
                "Only administrators can change role or active status".to_string(),
            ));
        }
        if actor.id != target_id && actor.role != UserRole::Admin {
            return Err(Error::Forbidden(
                "Not authorized to modify another user".to_string(),
            ));
        }

        if let Some(email) = &payload.email {
            if let Some(existing) = self.store.users.find_by_email(email).await? {
                if existing.id != target_id {
                    return Err(Error::Conflict("Email is already registered".to_string()));
                }
            }
        }

        let password_hash = match &payload.password {
            Some(password) => Some(crypto::hash_password(password)?),
            None => None,
        };

        let user = self
            .store
            .users
            .update(
                target_id,
                UserPatch {
                    email: payload.email,
                    password_hash,
                    role: payload.role,
                    is_active: payload.is_active,
                },
            )
            .await?;
        tracing::info!(user_id = user.id, actor_id = actor.id, "User updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewUser;

    async fn seed(store: &Store, email: &str, role: UserRole) -> User {
        store
            .users
            .create(NewUser {
                email: email.into(),
                password_hash: crypto::hash_password("password123").unwrap(),
                role,
                is_active: true,
            })
            .await
            .unwrap()
    }

    fn update(email: Option<&str>) -> UpdateUserPayload {
        UpdateUserPayload {
            email: email.map(Into::into),
            password: None,
            role: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn users_cannot_promote_themselves() {
        let (store, _) = Store::in_memory();
        let seeker = seed(&store, "seeker@example.com", UserRole::JobSeeker).await;
        let users = UserService::new(store);

        let mut payload = update(None);
        payload.role = Some(UserRole::Admin);
        let err = users.update(&seeker, seeker.id, payload).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(users.get(seeker.id).await.unwrap().role, UserRole::JobSeeker);
    }

    #[tokio::test]
    async fn email_changes_respect_uniqueness() {
        let (store, _) = Store::in_memory();
        let first = seed(&store, "first@example.com", UserRole::JobSeeker).await;
        seed(&store, "second@example.com", UserRole::JobSeeker).await;
        let users = UserService::new(store);

        let err = users
            .update(&first, first.id, update(Some("second@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let renamed = users
            .update(&first, first.id, update(Some("renamed@example.com")))
            .await
            .unwrap();
        assert_eq!(renamed.email, "renamed@example.com");
    }

    #[tokio::test]
    async fn password_changes_are_rehashed() {
        let (store, _) = Store::in_memory();
        let user = seed(&store, "pw@example.com", UserRole::Recruiter).await;
        let users = UserService::new(store);

        let mut payload = update(None);
        payload.password = Some("new-password".into());
        let updated = users.update(&user, user.id, payload).await.unwrap();
        assert_ne!(updated.password_hash, "new-password");
        assert!(crypto::verify_password("new-password", &updated.password_hash));
    }
}
