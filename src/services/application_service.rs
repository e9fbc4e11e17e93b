use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationPatch, ApplicationStatus, NewApplication,
};
use crate::models::job::{Job, JobStatus};
use crate::models::user::User;
use crate::repositories::{Entity, Store};
use crate::services::activity_service::{self, ActivityService};
use crate::services::notification_service::{Notification, NotificationService};

#[derive(Clone)]
pub struct ApplicationService {
    store: Store,
    activity: ActivityService,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(
        store: Store,
        activity: ActivityService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            store,
            activity,
            notifications,
        }
    }

    /// At most one live application per (job, seeker). The pre-check gives a
    /// friendly error; the store's unique constraint settles races.
    pub async fn submit_application(
        &self,
        job_id: i64,
        job_seeker_id: i64,
        applicant_email: &str,
    ) -> Result<Application> {
        let job = self
            .store
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;
        if job.status != JobStatus::Open {
            return Err(Error::InvalidTransition(format!(
                "Job is {} and not accepting applications",
                job.status
            )));
        }

        if self
            .store
            .applications
            .find_by_pair(job_id, job_seeker_id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "You have already applied for this job".to_string(),
            ));
        }

        let application = self
            .store
            .applications
            .create(NewApplication {
                job_id,
                job_seeker_id,
            })
            .await
            .map_err(|e| match e {
                Error::Conflict(_) => {
                    Error::Conflict("You have already applied for this job".to_string())
                }
                other => other,
            })?;

        tracing::info!(
            application_id = application.id,
            job_id,
            job_seeker_id,
            "Application submitted"
        );
        self.notifications.dispatch(Notification::ApplicationConfirmation {
            email: applicant_email.to_string(),
            job_title: job.title.clone(),
            application_id: application.id,
        });
        self.alert_recruiter(job, job_seeker_id);
        self.activity.record(
            None,
            activity_service::APPLICATION_SUBMITTED,
            activity_service::ENTITY_APPLICATION,
            application.id,
        );
        Ok(application)
    }

    pub async fn update_application_status(
        &self,
        application_id: i64,
        new_status: ApplicationStatus,
        recruiter_id: i64,
        actor_id: Option<i64>,
    ) -> Result<Application> {
        let application = self
            .store
            .applications
            .get(application_id)
            .await?
            .ok_or_else(|| Error::not_found(Application::NAME))?;
        let job = self.owned_job(application.job_id, recruiter_id).await?;

        if application.status == new_status {
            return Ok(application);
        }
        if !application.status.can_transition_to(new_status) {
            return Err(Error::InvalidTransition(format!(
                "Cannot change application status from {} to {}",
                application.status, new_status
            )));
        }

        let updated = self
            .store
            .applications
            .update(
                application_id,
                ApplicationPatch {
                    status: Some(new_status),
                },
            )
            .await?;

        tracing::info!(
            application_id,
            from = %application.status,
            to = %new_status,
            "Application status changed"
        );
        self.notify_status_change(updated.job_seeker_id, job.title, new_status);
        self.activity.record(
            actor_id,
            activity_service::APPLICATION_STATUS_CHANGED,
            activity_service::ENTITY_APPLICATION,
            application_id,
        );
        Ok(updated)
    }

    pub async fn get(&self, application_id: i64) -> Result<Application> {
        self.store
            .applications
            .get(application_id)
            .await?
            .ok_or_else(|| Error::not_found(Application::NAME))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Application>> {
        self.store.applications.list(offset, limit).await
    }

    pub async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        self.store
            .applications
            .list_by_job_seeker(job_seeker_id, offset, limit)
            .await
    }

    pub async fn list_by_job(
        &self,
        job_id: i64,
        recruiter_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        self.owned_job(job_id, recruiter_id).await?;
        self.store
            .applications
            .list_by_job(job_id, offset, limit)
            .await
    }

    async fn owned_job(&self, job_id: i64, recruiter_id: i64) -> Result<Job> {
        let job = self
            .store
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;
        if job.recruiter_id != recruiter_id {
            return Err(Error::Forbidden(
                "Not authorized to manage applications for this job".to_string(),
            ));
        }
        Ok(job)
    }

    fn alert_recruiter(&self, job: Job, job_seeker_id: i64) {
        let store = self.store.clone();
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            match recruiter_alert(&store, &job, job_seeker_id).await {
                Ok(Some(notification)) => notifications.dispatch(notification),
                Ok(None) => tracing::warn!(job_id = job.id, "No recruiter account to alert"),
                Err(e) => {
                    tracing::warn!(job_id = job.id, error = %e, "Recruiter alert lookup failed")
                }
            }
        });
    }

    fn notify_status_change(
        &self,
        job_seeker_id: i64,
        job_title: String,
        new_status: ApplicationStatus,
    ) {
        let store = self.store.clone();
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            match applicant_user(&store, job_seeker_id).await {
                Ok(Some(user)) => notifications.dispatch(Notification::ApplicationStatusUpdate {
                    email: user.email,
                    job_title,
                    new_status,
                }),
                Ok(None) => tracing::warn!(job_seeker_id, "No applicant account to notify"),
                Err(e) => tracing::warn!(job_seeker_id, error = %e, "Status update lookup failed"),
            }
        });
    }
}

pub(crate) async fn applicant_user(store: &Store, job_seeker_id: i64) -> Result<Option<User>> {
    let Some(seeker) = store.job_seekers.get(job_seeker_id).await? else {
        return Ok(None);
    };
    store.users.get(seeker.user_id).await
}

async fn recruiter_alert(
    store: &Store,
    job: &Job,
    job_seeker_id: i64,
) -> Result<Option<Notification>> {
    let Some(recruiter) = store.recruiters.get(job.recruiter_id).await? else {
        return Ok(None);
    };
    let Some(recruiter_user) = store.users.get(recruiter.user_id).await? else {
        return Ok(None);
    };
    let applicant_name = store
        .job_seekers
        .get(job_seeker_id)
        .await?
        .map(|seeker| seeker.full_name)
        .unwrap_or_else(|| format!("Job seeker #{}", job_seeker_id));

    Ok(Some(Notification::NewApplicationAlert {
        recruiter_email: recruiter_user.email,
        job_title: job.title.clone(),
        applicant_name,
    }))
}
