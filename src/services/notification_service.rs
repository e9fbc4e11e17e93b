use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;
use crate::models::interview::InterviewMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    ApplicationConfirmation {
        email: String,
        job_title: String,
        application_id: i64,
    },
    NewApplicationAlert {
        recruiter_email: String,
        job_title: String,
        applicant_name: String,
    },
    ApplicationStatusUpdate {
        email: String,
        job_title: String,
        new_status: ApplicationStatus,
    },
    InterviewInvitation {
        email: String,
        job_title: String,
        interview_date: DateTime<Utc>,
        mode: InterviewMode,
    },
    Welcome {
        email: String,
        name: String,
    },
}

impl Notification {
    pub fn recipient(&self) -> &str {
        match self {
            Notification::ApplicationConfirmation { email, .. }
            | Notification::ApplicationStatusUpdate { email, .. }
            | Notification::InterviewInvitation { email, .. }
            | Notification::Welcome { email, .. } => email,
            Notification::NewApplicationAlert {
                recruiter_email, ..
            } => recruiter_email,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ApplicationConfirmation { .. } => "application_confirmation",
            Notification::NewApplicationAlert { .. } => "new_application_alert",
            Notification::ApplicationStatusUpdate { .. } => "application_status_update",
            Notification::InterviewInvitation { .. } => "interview_invitation",
            Notification::Welcome { .. } => "welcome",
        }
    }
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Writes every notification to the log. Always installed.
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            kind = notification.kind(),
            recipient = %notification.recipient(),
            "[NOTIFICATION] {:?}",
            notification
        );
        Ok(())
    }
}

/// POSTs each notification as JSON to a configured endpoint.
pub struct WebhookSender {
    client: Client,
    target_url: String,
    secret: Option<String>,
}

impl WebhookSender {
    pub fn new(target_url: String, secret: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            target_url,
            secret,
        })
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let mut request = self.client.post(&self.target_url).json(notification);
        if let Some(secret) = &self.secret {
            request = request.header("X-Webhook-Secret", secret);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Webhook delivery failed: {}", e)))?;
        if !resp.status().is_success() {
            return Err(Error::Internal(format!(
                "Webhook responded with {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Handle used by request paths. `dispatch` never blocks and never fails the
/// caller; delivery happens on the worker.
#[derive(Clone)]
pub struct NotificationService {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationService {
    pub fn new(senders: Vec<Arc<dyn NotificationSender>>) -> (Self, NotificationWorker) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, NotificationWorker { rx, senders })
    }

    /// Creates the handle and runs its worker on the current runtime.
    pub fn spawn(senders: Vec<Arc<dyn NotificationSender>>) -> Self {
        let (service, worker) = Self::new(senders);
        tokio::spawn(worker.run());
        service
    }

    pub fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::error!(kind = e.0.kind(), "Notification worker is gone; dropping it");
        }
    }
}

pub struct NotificationWorker {
    rx: mpsc::UnboundedReceiver<Notification>,
    senders: Vec<Arc<dyn NotificationSender>>,
}

impl NotificationWorker {
    pub async fn run(mut self) {
        tracing::info!(senders = self.senders.len(), "Notification worker started");
        while let Some(notification) = self.rx.recv().await {
            for sender in &self.senders {
                if let Err(e) = sender.send(&notification).await {
                    tracing::error!(
                        sender = sender.name(),
                        kind = notification.kind(),
                        error = %e,
                        "Failed to deliver notification"
                    );
                }
            }
        }
        tracing::info!("Notification worker stopped");
    }
}
