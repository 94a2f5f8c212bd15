use anyhow::Context as _;

use tera::{Context, Tera};

use crate::model::NewSubmission;

// Template names ending in .html are auto-escaped by tera,
// the .txt counterparts are rendered verbatim.
const ADMIN_NOTIFICATION_HTML: (&str, &str) = (
    "admin_notification.html",
    r#"<html>
  <body style="font-family: sans-serif; color: #1f2430;">
    <h2>New contact submission</h2>
    <p>Someone reached out through the portfolio contact form.</p>
    <table cellpadding="6">
      <tr><td><strong>From</strong></td><td>{{ name }} ({{ email }})</td></tr>
      <tr><td><strong>Subject</strong></td><td>{{ subject }}</td></tr>
    </table>
    <h3>Message</h3>
    <p>{{ message }}</p>
    <p>Reply directly to this email to answer.</p>
  </body>
</html>"#,
);

const ADMIN_NOTIFICATION_TEXT: (&str, &str) = (
    "admin_notification.txt",
    r#"New contact submission

From: {{ name }} ({{ email }})
Subject: {{ subject }}

{{ message }}

Reply directly to this email to answer."#,
);

const USER_CONFIRMATION_HTML: (&str, &str) = (
    "user_confirmation.html",
    r#"<html>
  <body style="font-family: sans-serif; color: #1f2430;">
    <h2>Thanks for reaching out, {{ name }}!</h2>
    <p>I received your message and will get back to you as soon as possible.</p>
    <p>Here is a copy of what you sent:</p>
    <p><strong>Subject:</strong> {{ subject }}</p>
    <blockquote>{{ message }}</blockquote>
    <p>Best regards,<br/>{{ owner_name }}</p>
  </body>
</html>"#,
);

const USER_CONFIRMATION_TEXT: (&str, &str) = (
    "user_confirmation.txt",
    r#"Thanks for reaching out, {{ name }}!

I received your message and will get back to you as soon as possible.

Here is a copy of what you sent:

Subject: {{ subject }}

{{ message }}

Best regards,
{{ owner_name }}"#,
);

/// Rendered body pair for a single email
#[derive(Debug)]
pub struct RenderedBody {
    pub html: String,
    pub text: String,
}

/// Email templates for contact notifications
pub struct Templates(Tera);

impl Templates {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ADMIN_NOTIFICATION_HTML,
            ADMIN_NOTIFICATION_TEXT,
            USER_CONFIRMATION_HTML,
            USER_CONFIRMATION_TEXT,
        ])
        .context("Failed to register email templates")?;

        Ok(Self(tera))
    }

    pub fn render_admin_notification(
        &self,
        submission: &NewSubmission,
        owner_name: &str,
    ) -> anyhow::Result<RenderedBody> {
        self.render_pair(
            ADMIN_NOTIFICATION_HTML.0,
            ADMIN_NOTIFICATION_TEXT.0,
            submission,
            owner_name,
        )
    }

    pub fn render_user_confirmation(
        &self,
        submission: &NewSubmission,
        owner_name: &str,
    ) -> anyhow::Result<RenderedBody> {
        self.render_pair(
            USER_CONFIRMATION_HTML.0,
            USER_CONFIRMATION_TEXT.0,
            submission,
            owner_name,
        )
    }

    fn render_pair(
        &self,
        html_name: &str,
        text_name: &str,
        submission: &NewSubmission,
        owner_name: &str,
    ) -> anyhow::Result<RenderedBody> {
        let context = template_context(submission, owner_name);

        let html = self
            .0
            .render(html_name, &context)
            .with_context(|| format!("Failed to render {}", html_name))?;
        let text = self
            .0
            .render(text_name, &context)
            .with_context(|| format!("Failed to render {}", text_name))?;

        Ok(RenderedBody { html, text })
    }
}

fn template_context(submission: &NewSubmission, owner_name: &str) -> Context {
    let mut context = Context::new();
    context.insert("name", &submission.full_name());
    context.insert("email", submission.email.as_ref());
    context.insert("subject", submission.subject.as_ref());
    context.insert("message", submission.message.as_ref());
    context.insert("owner_name", owner_name);
    context
}
