use super::template::{self, Confirmation};
use super::{Notifier, NotifyError};
use crate::config::Config;
use crate::db::Application;
use futures::future::BoxFuture;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

/// Confirmation sender backed by an authenticated SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    company: String,
}

impl SmtpNotifier {
    pub fn from_config(cfg: &Config) -> Result<Self, NotifyError> {
        let (user, pass) = cfg.mail_account().ok_or(NotifyError::NotConfigured)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)?
            .credentials(Credentials::new(user.to_owned(), pass.to_owned()))
            .timeout(Some(Duration::from_secs(cfg.smtp_timeout_secs)))
            .build();
        let from = Mailbox::new(Some(cfg.mail_from_name.clone()), user.parse::<Address>()?);
        Ok(Self::new(transport, from, cfg.company_name.clone()))
    }

    pub fn new(
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
        company: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            from,
            company: company.into(),
        }
    }

    fn build_message(&self, application: &Application) -> Result<Message, NotifyError> {
        let recipient = application
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(NotifyError::MissingRecipient)?;
        let to = Mailbox::new(application.name.clone(), recipient.parse::<Address>()?);

        let Confirmation {
            subject,
            text,
            html,
        } = template::render(application, &self.company);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text, html))?;
        Ok(message)
    }
}

impl Notifier for SmtpNotifier {
    fn notify<'a>(
        &'a self,
        application: &'a Application,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async move {
            let message = self.build_message(application)?;
            self.transport.send(message).await?;
            Ok(())
        })
    }
}
