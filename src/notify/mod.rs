//! Best-effort applicant confirmation emails.
//!
//! A notification is attempted only after the application is stored, and its failure
//! never fails the submission: [`deliver`] folds every error into [`NotifyOutcome::Failed`].

pub mod smtp;
pub mod template;

pub use smtp::SmtpNotifier;

use crate::config::Config;
use crate::db::Application;
use futures::future::BoxFuture;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{info, warn};

#[derive(Debug, ThisError)]
pub enum NotifyError {
    #[error("mail account is not configured")]
    NotConfigured,

    #[error("application has no email address")]
    MissingRecipient,

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Failed,
}

/// Sends the confirmation for one stored application.
pub trait Notifier: Send + Sync {
    fn notify<'a>(
        &'a self,
        application: &'a Application,
    ) -> BoxFuture<'a, Result<(), NotifyError>>;
}

/// Attempt a notification and reduce the result to an outcome, logging failures.
pub async fn deliver(notifier: &dyn Notifier, application: &Application) -> NotifyOutcome {
    match notifier.notify(application).await {
        Ok(()) => {
            info!(id = application.id, "confirmation email sent");
            NotifyOutcome::Sent
        }
        Err(e) => {
            warn!(id = application.id, error = %e, "email send error");
            NotifyOutcome::Failed
        }
    }
}

/// Stand-in used when no mail account is configured; every notification fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredNotifier;

impl Notifier for UnconfiguredNotifier {
    fn notify<'a>(
        &'a self,
        _application: &'a Application,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async { Err(NotifyError::NotConfigured) })
    }
}

/// Pick the SMTP notifier when credentials are present, otherwise the unconfigured one.
pub fn from_config(cfg: &Config) -> Result<Arc<dyn Notifier>, NotifyError> {
    if cfg.mail_account().is_none() {
        warn!("EMAIL_USER/EMAIL_PASSWORD not set; confirmation emails are disabled");
        return Ok(Arc::new(UnconfiguredNotifier));
    }
    Ok(Arc::new(SmtpNotifier::from_config(cfg)?))
}
