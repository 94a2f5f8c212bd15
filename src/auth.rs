use std::future::Future;
use std::pin::Pin;

use actix_web::http::header::HeaderMap;
use actix_web::{dev, web, FromRequest, HttpRequest};

use anyhow::Context;

use secrecy::Secret;

use sha2::{Digest, Sha256};

use crate::error::RestError;

const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Shared secret guarding the admin endpoints
#[derive(Debug)]
pub struct AdminKey(Secret<String>);

impl AdminKey {
    pub fn new(key: Secret<String>) -> Self {
        Self(key)
    }

    /// Compare a caller-supplied key against the configured secret.
    /// Compares sha2 digests rather than the raw strings.
    pub fn verify(&self, candidate: &str) -> anyhow::Result<()> {
        use secrecy::ExposeSecret;

        let expected = Sha256::digest(self.0.expose_secret().as_bytes());
        let provided = Sha256::digest(candidate.as_bytes());

        anyhow::ensure!(expected == provided, "Admin key does not match");
        Ok(())
    }
}

/// Extractor proving the caller supplied the configured admin key
#[derive(Debug)]
pub struct Administrator;

impl FromRequest for Administrator {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            // NOTE: Must be registered with the application at startup
            let admin_key = req
                .app_data::<web::Data<AdminKey>>()
                .expect("AdminKey not registered for application");

            let candidate = shared_key_from_headers(req.headers())
                .map_err(RestError::FailedToAuthenticate)?;

            admin_key
                .verify(&candidate)
                .map_err(RestError::FailedToAuthenticate)?;

            Ok(Administrator)
        })
    }
}

/// Extract the shared admin key from the headers of a request
fn shared_key_from_headers(headers: &HeaderMap) -> anyhow::Result<String> {
    let header_value = headers
        .get(ADMIN_KEY_HEADER)
        .context("Missing admin key in header")?
        .to_str()
        .context("Admin key is not valid UTF-8")?;

    Ok(header_value.to_string())
}
