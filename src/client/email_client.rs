use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

use crate::domain::EmailAddress;

const POSTMARK_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Debug)]
pub struct EmailClient {
    client: Client,
    sender: EmailAddress,

    api_base_url: Url,
    api_send_email_url: Url,
    api_auth_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        sender: EmailAddress,
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_email_url = api_base_url
            .join("email")
            .context("Failed to create send email endpoint URL")?;

        Ok(Self {
            client,
            sender,
            api_base_url,
            api_send_email_url,
            api_auth_token,
        })
    }

    #[tracing::instrument(name = "Send an email via API")]
    pub async fn send(&self, email: &Email) -> reqwest::Result<()> {
        use secrecy::ExposeSecret;

        let body = email.as_request(&self.sender);

        self.client
            .post(self.api_send_email_url.clone())
            .header(POSTMARK_TOKEN_HEADER, self.api_auth_token.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Reachability probe against the mail API host.
    /// Any HTTP response counts as reachable, the status is not inspected.
    #[tracing::instrument(name = "Ping the mail API")]
    pub async fn ping(&self) -> reqwest::Result<()> {
        self.client.get(self.api_base_url.clone()).send().await?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Email {
    pub recipient: EmailAddress,
    /// Address replies should go to, when different from the sender
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl Email {
    fn as_request<'e>(&'e self, sender: &'e EmailAddress) -> SendEmailRequest<'e> {
        SendEmailRequest {
            to: self.recipient.as_ref(),
            from: sender.as_ref(),
            reply_to: self.reply_to.as_ref().map(AsRef::as_ref),
            subject: &self.subject,
            html_body: &self.html_body,
            text_body: &self.text_body,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    to: &'a str,
    from: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
