use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::sqlite::SqliteConnectOptions;

use url::Url;

use crate::domain::EmailAddress;

#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email: EmailSettings,
    pub contact: ContactSettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");

        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,

    admin_key: Secret<String>,
}

impl ApplicationSettings {
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    pub fn admin_key(&self) -> &Secret<String> {
        &self.admin_key
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    file: String,
    create_if_missing: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.file)
            .create_if_missing(self.create_if_missing)
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    sender: String,
    owner: String,
    owner_name: String,
    api_base_url: String,
    api_auth_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    api_timeout_milliseconds: u64,
}

impl EmailSettings {
    pub fn sender(&self) -> EmailAddress {
        self.sender
            .parse()
            .expect("Failed to parse email sender address")
    }

    /// Address that receives admin notifications
    pub fn owner(&self) -> EmailAddress {
        self.owner
            .parse()
            .expect("Failed to parse owner email address")
    }

    /// Display name used to sign confirmation emails
    pub fn owner_name(&self) -> String {
        self.owner_name.clone()
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_milliseconds)
    }

    pub fn api_base_url(&self) -> Url {
        Url::parse(&self.api_base_url).expect("Failed to parse email base URL")
    }

    pub fn api_auth_token(&self) -> Secret<String> {
        self.api_auth_token.clone()
    }
}

/// Policy knobs for the contact submission flow
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSettings {
    /// When set, a storage failure fails the whole request instead of
    /// continuing on to notification delivery
    pub require_persistence: bool,
}
