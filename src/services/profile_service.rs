use crate::dto::profile_dto::{
    CreateJobSeekerPayload, CreateRecruiterPayload, UpdateJobSeekerPayload,
    UpdateRecruiterPayload,
};
use crate::error::{Error, Result};
use crate::models::profile::{JobSeeker, JobSeekerSkill, ProficiencyLevel, Recruiter};
use crate::models::user::User;
use crate::repositories::{Entity, Store};
use crate::services::auth_service::AuthService;
use crate::services::notification_service::{Notification, NotificationService};

#[derive(Clone)]
pub struct ProfileService {
    store: Store,
    notifications: NotificationService,
}

impl ProfileService {
    pub fn new(store: Store, notifications: NotificationService) -> Self {
        Self {
            store,
            notifications,
        }
    }

    pub async fn create_job_seeker(
        &self,
        actor: &User,
        payload: CreateJobSeekerPayload,
    ) -> Result<JobSeeker> {
        let owner = self.profile_owner(actor, payload.user_id).await?;
        if self
            .store
            .job_seekers
            .find_by_user(owner.id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "Profile already exists for this user".to_string(),
            ));
        }

        let profile = self.store.job_seekers.create(payload.into()).await?;
        tracing::info!(profile_id = profile.id, user_id = owner.id, "Job seeker profile created");
        self.notifications.dispatch(Notification::Welcome {
            email: owner.email,
            name: profile.full_name.clone(),
        });
        Ok(profile)
    }

    pub async fn create_recruiter(
        &self,
        actor: &User,
        payload: CreateRecruiterPayload,
    ) -> Result<Recruiter> {
        let owner = self.profile_owner(actor, payload.user_id).await?;
        if self
            .store
            .recruiters
            .find_by_user(owner.id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "Profile already exists for this user".to_string(),
            ));
        }

        let profile = self.store.recruiters.create(payload.into()).await?;
        tracing::info!(profile_id = profile.id, user_id = owner.id, "Recruiter profile created");
        self.notifications.dispatch(Notification::Welcome {
            email: owner.email,
            name: profile.company_name.clone(),
        });
        Ok(profile)
    }

    pub async fn get_job_seeker(&self, id: i64) -> Result<JobSeeker> {
        self.store
            .job_seekers
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(JobSeeker::NAME))
    }

    pub async fn get_job_seeker_by_user(&self, user_id: i64) -> Result<JobSeeker> {
        self.store
            .job_seekers
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found(JobSeeker::NAME))
    }

    pub async fn get_recruiter(&self, id: i64) -> Result<Recruiter> {
        self.store
            .recruiters
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(Recruiter::NAME))
    }

    pub async fn get_recruiter_by_user(&self, user_id: i64) -> Result<Recruiter> {
        self.store
            .recruiters
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found(Recruiter::NAME))
    }

    pub async fn update_job_seeker(
        &self,
        actor: &User,
        user_id: i64,
        payload: UpdateJobSeekerPayload,
    ) -> Result<JobSeeker> {
        AuthService::check_owner(actor, user_id)?;
        let profile = self.get_job_seeker_by_user(user_id).await?;
        self.store
            .job_seekers
            .update(profile.id, payload.into())
            .await
    }

    pub async fn update_recruiter(
        &self,
        actor: &User,
        user_id: i64,
        payload: UpdateRecruiterPayload,
    ) -> Result<Recruiter> {
        AuthService::check_owner(actor, user_id)?;
        let profile = self.get_recruiter_by_user(user_id).await?;
        self.store.recruiters.update(profile.id, payload.into()).await
    }

    pub async fn add_skill(
        &self,
        actor: &User,
        job_seeker_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<JobSeekerSkill> {
        let profile = self.get_job_seeker(job_seeker_id).await?;
        AuthService::check_owner(actor, profile.user_id)?;
        self.store
            .job_seekers
            .upsert_skill(profile.id, skill_id, level)
            .await
    }

    pub async fn skills(&self, job_seeker_id: i64) -> Result<Vec<JobSeekerSkill>> {
        let profile = self.get_job_seeker(job_seeker_id).await?;
        self.store.job_seekers.skills(profile.id).await
    }

    /// The caller's recruiter profile; acting as a recruiter requires one.
    pub async fn require_recruiter(&self, user: &User) -> Result<Recruiter> {
        self.store
            .recruiters
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| Error::Forbidden("A recruiter profile is required".to_string()))
    }

    pub async fn require_job_seeker(&self, user: &User) -> Result<JobSeeker> {
        self.store
            .job_seekers
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| Error::Forbidden("A job seeker profile is required".to_string()))
    }

    async fn profile_owner(&self, actor: &User, user_id: i64) -> Result<User> {
        AuthService::check_owner(actor, user_id)?;
        self.store.users.get(user_id).await?.ok_or_else(|| {
            Error::NotFound(format!(
                "User with ID {} not found. You must register the user first.",
                user_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::NewSkill;
    use crate::models::user::{NewUser, UserRole};

    async fn user(store: &Store, email: &str, role: UserRole) -> User {
        store
            .users
            .create(NewUser {
                email: email.into(),
                password_hash: "x".into(),
                role,
                is_active: true,
            })
            .await
            .unwrap()
    }

    fn seeker_payload(user_id: i64) -> CreateJobSeekerPayload {
        CreateJobSeekerPayload {
            user_id,
            full_name: "Sam Seeker".into(),
            phone: None,
            experience_years: Some(3),
            education: None,
            resume_url: None,
        }
    }

    fn service(store: &Store) -> ProfileService {
        let (notifications, _worker) = NotificationService::new(vec![]);
        ProfileService::new(store.clone(), notifications)
    }

    #[tokio::test]
    async fn one_profile_per_user() {
        let (store, _) = Store::in_memory();
        let owner = user(&store, "s@example.com", UserRole::JobSeeker).await;
        let profiles = service(&store);

        profiles
            .create_job_seeker(&owner, seeker_payload(owner.id))
            .await
            .unwrap();
        let err = profiles
            .create_job_seeker(&owner, seeker_payload(owner.id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn profiles_for_someone_else_need_admin() {
        let (store, _) = Store::in_memory();
        let owner = user(&store, "s@example.com", UserRole::JobSeeker).await;
        let other = user(&store, "o@example.com", UserRole::JobSeeker).await;
        let admin = user(&store, "a@example.com", UserRole::Admin).await;
        let profiles = service(&store);

        let err = profiles
            .create_job_seeker(&other, seeker_payload(owner.id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        let created = profiles
            .create_job_seeker(&admin, seeker_payload(owner.id))
            .await
            .unwrap();
        assert_eq!(created.user_id, owner.id);

        let err = profiles
            .create_job_seeker(&admin, seeker_payload(9999))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let (store, _) = Store::in_memory();
        let owner = user(&store, "s@example.com", UserRole::JobSeeker).await;
        let profiles = service(&store);
        profiles
            .create_job_seeker(&owner, seeker_payload(owner.id))
            .await
            .unwrap();

        let updated = profiles
            .update_job_seeker(
                &owner,
                owner.id,
                UpdateJobSeekerPayload {
                    full_name: None,
                    phone: Some("+91 555 0100".into()),
                    experience_years: None,
                    education: None,
                    resume_url: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Sam Seeker");
        assert_eq!(updated.experience_years, Some(3));
        assert_eq!(updated.phone.as_deref(), Some("+91 555 0100"));
    }

    #[tokio::test]
    async fn skills_are_upserted_per_profile() {
        let (store, _) = Store::in_memory();
        let owner = user(&store, "s@example.com", UserRole::JobSeeker).await;
        let profiles = service(&store);
        let profile = profiles
            .create_job_seeker(&owner, seeker_payload(owner.id))
            .await
            .unwrap();
        let rust = store
            .skills
            .create(NewSkill { name: "Rust".into() })
            .await
            .unwrap();

        profiles
            .add_skill(&owner, profile.id, rust.id, ProficiencyLevel::Beginner)
            .await
            .unwrap();
        profiles
            .add_skill(&owner, profile.id, rust.id, ProficiencyLevel::Advanced)
            .await
            .unwrap();

        let skills = profiles.skills(profile.id).await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].proficiency_level, ProficiencyLevel::Advanced);

        let err = profiles
            .add_skill(&owner, profile.id, 404, ProficiencyLevel::Beginner)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
