use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use sqlx::SqlitePool;

use tracing_actix_web::TracingLogger;

use crate::auth::AdminKey;
use crate::client::EmailClient;
use crate::controller::{contact, health};
use crate::notify::NotificationDispatcher;
use crate::settings::ContactSettings;

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: SqlitePool,
    email_client: EmailClient,
    dispatcher: NotificationDispatcher,
    admin_key: AdminKey,
    contact_settings: ContactSettings,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let email_client = web::Data::new(email_client);
    let dispatcher = web::Data::new(dispatcher);
    let admin_key = web::Data::new(admin_key);
    let contact_settings = web::Data::new(contact_settings);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(email_client.clone())
            .app_data(dispatcher.clone())
            .app_data(admin_key.clone())
            .app_data(contact_settings.clone())
            .service(health::check)
            .service(contact::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
