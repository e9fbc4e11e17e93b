use crate::dto::profile_dto::{ScheduleInterviewPayload, UpdateInterviewPayload};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::interview::{Interview, InterviewPatch, NewInterview};
use crate::models::job::Job;
use crate::repositories::{Entity, Store};
use crate::services::activity_service::{self, ActivityService};
use crate::services::application_service::applicant_user;
use crate::services::notification_service::{Notification, NotificationService};

#[derive(Clone)]
pub struct InterviewService {
    store: Store,
    activity: ActivityService,
    notifications: NotificationService,
}

impl InterviewService {
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

    /// Only the recruiter who owns the application's job may schedule.
    pub async fn schedule(
        &self,
        payload: ScheduleInterviewPayload,
        recruiter_id: i64,
        actor_id: Option<i64>,
    ) -> Result<Interview> {
        let (application, job) = self
            .owned_application(payload.application_id, recruiter_id)
            .await?;

        let interview = self
            .store
            .interviews
            .create(NewInterview {
                application_id: application.id,
                interview_date: payload.interview_date,
                mode: payload.mode,
            })
            .await?;

        tracing::info!(
            interview_id = interview.id,
            application_id = application.id,
            "Interview scheduled"
        );
        match applicant_user(&self.store, application.job_seeker_id).await {
            Ok(Some(user)) => self.notifications.dispatch(Notification::InterviewInvitation {
                email: user.email,
                job_title: job.title,
                interview_date: interview.interview_date,
                mode: interview.mode,
            }),
            Ok(None) => tracing::warn!(
                application_id = application.id,
                "No applicant account to invite"
            ),
            Err(e) => tracing::warn!(
                application_id = application.id,
                error = %e,
                "Interview invitation lookup failed"
            ),
        }
        self.activity.record(
            actor_id,
            activity_service::INTERVIEW_SCHEDULED,
            activity_service::ENTITY_INTERVIEW,
            interview.id,
        );
        Ok(interview)
    }

    pub async fn get(&self, interview_id: i64) -> Result<Interview> {
        self.store
            .interviews
            .get(interview_id)
            .await?
            .ok_or_else(|| Error::not_found(Interview::NAME))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Interview>> {
        self.store.interviews.list(offset, limit).await
    }

    pub async fn list_for_application(
        &self,
        application_id: i64,
        recruiter_id: i64,
    ) -> Result<Vec<Interview>> {
        self.owned_application(application_id, recruiter_id).await?;
        self.store
            .interviews
            .list_by_application(application_id)
            .await
    }

    pub async fn update(
        &self,
        interview_id: i64,
        payload: UpdateInterviewPayload,
        recruiter_id: i64,
    ) -> Result<Interview> {
        let interview = self.get(interview_id).await?;
        self.owned_application(interview.application_id, recruiter_id)
            .await?;

        self.store
            .interviews
            .update(
                interview_id,
                InterviewPatch {
                    interview_date: payload.interview_date,
                    mode: payload.mode,
                    result: payload.result,
                },
            )
            .await
    }

    async fn owned_application(
        &self,
        application_id: i64,
        recruiter_id: i64,
    ) -> Result<(Application, Job)> {
        let application = self
            .store
            .applications
            .get(application_id)
            .await?
            .ok_or_else(|| Error::not_found(Application::NAME))?;
        let job = self
            .store
            .jobs
            .get(application.job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;
        if job.recruiter_id != recruiter_id {
            return Err(Error::Forbidden(
                "Not authorized to manage interviews for this application".to_string(),
            ));
        }
        Ok((application, job))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::NewApplication;
    use crate::models::interview::{InterviewMode, InterviewResult};
    use crate::models::job::{JobStatus, JobType, NewJob};
    use crate::models::profile::{NewJobSeeker, NewRecruiter};
    use crate::models::user::{NewUser, User, UserRole};
    use crate::services::notification_service::NotificationSender;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use std::time::Duration as StdDuration;
    use tokio::sync::mpsc;

    struct Forward(mpsc::UnboundedSender<Notification>);

    #[async_trait]
    impl NotificationSender for Forward {
        fn name(&self) -> &'static str {
            "forward"
        }

        async fn send(&self, notification: &Notification) -> Result<()> {
            let _ = self.0.send(notification.clone());
            Ok(())
        }
    }

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

    /// Returns (recruiter_id, application_id).
    async fn seed(store: &Store) -> (i64, i64) {
        let recruiter_user = user(store, "r@example.com", UserRole::Recruiter).await;
        let recruiter = store
            .recruiters
            .create(NewRecruiter {
                user_id: recruiter_user.id,
                company_name: "Acme".into(),
                company_website: None,
            })
            .await
            .unwrap();
        let seeker_user = user(store, "s@example.com", UserRole::JobSeeker).await;
        let seeker = store
            .job_seekers
            .create(NewJobSeeker {
                user_id: seeker_user.id,
                full_name: "Sam Seeker".into(),
                phone: None,
                experience_years: None,
                education: None,
                resume_url: None,
            })
            .await
            .unwrap();
        let job = store
            .jobs
            .create_with_skills(
                NewJob {
                    recruiter_id: recruiter.id,
                    title: "Backend Engineer".into(),
                    description: "Build services".into(),
                    location: "Berlin".into(),
                    salary_min: None,
                    salary_max: None,
                    job_type: JobType::FullTime,
                    status: JobStatus::Open,
                },
                &[],
            )
            .await
            .unwrap();
        let application = store
            .applications
            .create(NewApplication {
                job_id: job.id,
                job_seeker_id: seeker.id,
            })
            .await
            .unwrap();
        (recruiter.id, application.id)
    }

    fn payload(application_id: i64) -> ScheduleInterviewPayload {
        ScheduleInterviewPayload {
            application_id,
            interview_date: Utc::now() + Duration::days(2),
            mode: InterviewMode::Online,
        }
    }

    #[tokio::test]
    async fn scheduling_invites_the_applicant() {
        let (store, _) = Store::in_memory();
        let (recruiter_id, application_id) = seed(&store).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let senders: Vec<Arc<dyn NotificationSender>> = vec![Arc::new(Forward(tx))];
        let notifications = NotificationService::spawn(senders);
        let interviews = InterviewService::new(
            store.clone(),
            ActivityService::new(store.activity_logs.clone()),
            notifications,
        );

        let interview = interviews
            .schedule(payload(application_id), recruiter_id, None)
            .await
            .unwrap();
        assert_eq!(interview.result, InterviewResult::Pending);

        let sent = tokio::time::timeout(StdDuration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sent.kind(), "interview_invitation");
        assert_eq!(sent.recipient(), "s@example.com");
    }

    #[tokio::test]
    async fn other_recruiters_cannot_schedule_or_update() {
        let (store, _) = Store::in_memory();
        let (recruiter_id, application_id) = seed(&store).await;
        let (notifications, _worker) = NotificationService::new(vec![]);
        let interviews = InterviewService::new(
            store.clone(),
            ActivityService::new(store.activity_logs.clone()),
            notifications,
        );

        let err = interviews
            .schedule(payload(application_id), recruiter_id + 100, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        let interview = interviews
            .schedule(payload(application_id), recruiter_id, None)
            .await
            .unwrap();
        let err = interviews
            .update(
                interview.id,
                UpdateInterviewPayload {
                    interview_date: None,
                    mode: None,
                    result: Some(InterviewResult::Pass),
                },
                recruiter_id + 100,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        let updated = interviews
            .update(
                interview.id,
                UpdateInterviewPayload {
                    interview_date: None,
                    mode: None,
                    result: Some(InterviewResult::Pass),
                },
                recruiter_id,
            )
            .await
            .unwrap();
        assert_eq!(updated.result, InterviewResult::Pass);
        assert_eq!(updated.mode, InterviewMode::Online);
    }

    #[tokio::test]
    async fn unknown_applications_are_not_found() {
        let (store, _) = Store::in_memory();
        let (recruiter_id, _) = seed(&store).await;
        let (notifications, _worker) = NotificationService::new(vec![]);
        let interviews = InterviewService::new(
            store.clone(),
            ActivityService::new(store.activity_logs.clone()),
            notifications,
        );

        let err = interviews
            .schedule(payload(9999), recruiter_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
