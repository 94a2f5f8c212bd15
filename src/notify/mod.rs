mod templates;

pub use templates::Templates;

use anyhow::Context;

use crate::client::{Email, EmailClient};
use crate::domain::EmailAddress;
use crate::model::NewSubmission;

/// Outcome of the two notification sends for one submission.
/// Channels succeed or fail independently of each other.
#[derive(Debug, Clone, Copy)]
pub struct DispatchReport {
    pub admin_notification: bool,
    pub user_confirmation: bool,
}

impl DispatchReport {
    pub fn all_successful(&self) -> bool {
        self.admin_notification && self.user_confirmation
    }

    pub fn any_successful(&self) -> bool {
        self.admin_notification || self.user_confirmation
    }
}

/// Renders and sends the two emails for an accepted submission:
/// a notification to the site owner and a confirmation to the submitter.
pub struct NotificationDispatcher {
    templates: Templates,
    owner: EmailAddress,
    owner_name: String,
}

impl NotificationDispatcher {
    pub fn new(owner: EmailAddress, owner_name: String) -> anyhow::Result<Self> {
        let templates = Templates::new()?;

        Ok(Self {
            templates,
            owner,
            owner_name,
        })
    }

    /// Attempt both sends concurrently and wait for both outcomes.
    /// A failed channel is logged and reported, never re-thrown.
    #[tracing::instrument(name = "Dispatch contact notifications", skip(self, email_client))]
    pub async fn dispatch(
        &self,
        email_client: &EmailClient,
        submission: &NewSubmission,
    ) -> DispatchReport {
        let (admin_notification, user_confirmation) = tokio::join!(
            self.send_admin_notification(email_client, submission),
            self.send_user_confirmation(email_client, submission),
        );

        if let Err(error) = &admin_notification {
            tracing::error!(error.cause_chain = ?error, "Failed to send admin notification");
        }
        if let Err(error) = &user_confirmation {
            tracing::error!(error.cause_chain = ?error, "Failed to send user confirmation");
        }

        DispatchReport {
            admin_notification: admin_notification.is_ok(),
            user_confirmation: user_confirmation.is_ok(),
        }
    }

    async fn send_admin_notification(
        &self,
        email_client: &EmailClient,
        submission: &NewSubmission,
    ) -> anyhow::Result<()> {
        let body = self
            .templates
            .render_admin_notification(submission, &self.owner_name)?;

        let email = Email {
            recipient: self.owner.clone(),
            // Replies go straight back to the submitter
            reply_to: Some(submission.email.clone()),
            subject: format!("New contact submission: {}", submission.subject.as_ref()),
            html_body: body.html,
            text_body: body.text,
        };

        email_client
            .send(&email)
            .await
            .context("Failed to send admin notification email")
    }

    async fn send_user_confirmation(
        &self,
        email_client: &EmailClient,
        submission: &NewSubmission,
    ) -> anyhow::Result<()> {
        let body = self
            .templates
            .render_user_confirmation(submission, &self.owner_name)?;

        let email = Email {
            recipient: submission.email.clone(),
            reply_to: None,
            subject: "Your message has been received".into(),
            html_body: body.html,
            text_body: body.text,
        };

        email_client
            .send(&email)
            .await
            .context("Failed to send user confirmation email")
    }
}
