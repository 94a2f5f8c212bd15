use std::net::TcpListener;

use anyhow::Context;

use sqlx::SqlitePool;

use folio::auth::AdminKey;
use folio::client::EmailClient;
use folio::notify::NotificationDispatcher;
use folio::settings::Settings;
use folio::{app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().expect("Failed to load settings");

    let pool = SqlitePool::connect_with(settings.database.connect_options()).await?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;

    let dispatcher = NotificationDispatcher::new(settings.email.owner(), settings.email.owner_name())?;

    let admin_key = AdminKey::new(settings.app.admin_key().clone());

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(
        listener,
        pool,
        email_client,
        dispatcher,
        admin_key,
        settings.contact.clone(),
    )?
    .await
    .context("Failed to run app")
}
