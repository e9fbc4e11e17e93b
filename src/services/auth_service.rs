use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserRole};
use crate::repositories::Store;
use crate::services::activity_service::{self, ActivityService};
use crate::services::notification_service::{Notification, NotificationService};
use crate::utils::{crypto, token::TokenKeys};

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    keys: TokenKeys,
    activity: ActivityService,
    notifications: NotificationService,
}

impl AuthService {
    pub fn new(
        store: Store,
        keys: TokenKeys,
        activity: ActivityService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            store,
            keys,
            activity,
            notifications,
        }
    }

    /// `None` when the email is unknown or the password does not verify.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.store.users.find_by_email(email).await? else {
            return Ok(None);
        };
        if !crypto::verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        Ok(Some(user))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .authenticate(email, password)
            .await?
            .ok_or_else(|| Error::BadRequest("Incorrect email or password".to_string()))?;
        if !user.is_active {
            return Err(Error::InactiveUser);
        }
        tracing::info!(user_id = user.id, "User logged in");
        self.issue_token(&user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        self.keys.issue(user.id, user.role)
    }

    pub async fn register_user(&self, payload: RegisterPayload) -> Result<User> {
        if self.store.users.find_by_email(&payload.email).await?.is_some() {
            return Err(Error::Conflict(
                "The user with this username already exists in the system.".to_string(),
            ));
        }

        let password_hash = crypto::hash_password(&payload.password)?;
        let user = self
            .store
            .users
            .create(NewUser {
                email: payload.email,
                password_hash,
                role: payload.role,
                is_active: payload.is_active,
            })
            .await?;

        tracing::info!(user_id = user.id, role = ?user.role, "User registered");
        self.activity.record(
            Some(user.id),
            activity_service::USER_CREATED,
            activity_service::ENTITY_USER,
            user.id,
        );
        let name = user.email.split('@').next().unwrap_or_default().to_string();
        self.notifications.dispatch(Notification::Welcome {
            email: user.email.clone(),
            name,
        });
        Ok(user)
    }

    /// Resolves a bearer token to a live, active user.
    pub async fn resolve_user(&self, token: &str) -> Result<User> {
        let claims = self.keys.decode(token)?;
        let user = self
            .store
            .users
            .get(claims.user_id()?)
            .await?
            .ok_or_else(|| Error::Unauthorized("Could not validate credentials".to_string()))?;
        if !user.is_active {
            return Err(Error::InactiveUser);
        }
        Ok(user)
    }

    pub fn check_permission(user: &User, required: UserRole) -> Result<()> {
        if user.role.satisfies(required) {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "The user doesn't have enough privileges".to_string(),
            ))
        }
    }

    /// Acting on a resource that belongs to `owner_user_id`.
    pub fn check_owner(user: &User, owner_user_id: i64) -> Result<()> {
        if user.id == owner_user_id || user.role == UserRole::Admin {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "Not authorized to act on behalf of another user".to_string(),
            ))
        }
    }
}
