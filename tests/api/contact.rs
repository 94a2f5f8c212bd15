use reqwest::StatusCode;

use sqlx::SqlitePool;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use folio::model::SubmissionFilter;
use folio::repo::{SqliteSubmissionRepo, SubmissionRepo};
use folio::settings::ContactSettings;

use crate::helpers::{ContactFormBody, TestApp, OWNER_EMAIL};

#[sqlx::test]
async fn contact_returns_success_for_valid_submission(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        // One admin notification, one user confirmation
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(Some(true), body["success"].as_bool());
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["timestamp"].is_string());

    Ok(())
}

#[sqlx::test]
async fn accepted_submission_round_trips_through_the_store(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let mut form = ContactFormBody::valid();
    // Whitespace and casing are normalized at acceptance
    form.email = Some(" Jo.Doe@X.COM ".into());

    let _res = app
        .contact_create(&form)
        .await
        .expect("Failed to execute request");

    let submissions = SqliteSubmissionRepo::fetch_all(&pool, &SubmissionFilter::default())
        .await
        .expect("Failed to fetch stored submissions");

    assert_eq!(1, submissions.len());
    assert_eq!("Jo", submissions[0].first_name);
    assert_eq!("Doe", submissions[0].last_name);
    assert_eq!("jo.doe@x.com", submissions[0].email);
    assert_eq!("Hello there", submissions[0].subject);
    assert_eq!("This is a test message.", submissions[0].message);

    Ok(())
}

#[sqlx::test]
async fn contact_captures_audit_metadata(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let _res = app
        .request(reqwest::Method::POST, "api/contact")
        .header(reqwest::header::USER_AGENT, "folio-tests")
        .json(&ContactFormBody::valid())
        .send()
        .await
        .expect("Failed to execute request");

    let submissions = SqliteSubmissionRepo::fetch_all(&pool, &SubmissionFilter::default())
        .await
        .expect("Failed to fetch stored submissions");

    assert_eq!(Some("folio-tests".into()), submissions[0].user_agent);
    assert!(submissions[0].requester_ip.is_some());

    Ok(())
}

#[sqlx::test]
async fn both_notification_emails_are_attempted(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let _res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    let recipients: Vec<String> = app
        .email_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["To"].as_str().unwrap().to_string()
        })
        .collect();

    assert!(recipients.contains(&OWNER_EMAIL.to_string()));
    assert!(recipients.contains(&"jo@x.com".to_string()));

    Ok(())
}

#[sqlx::test]
async fn contact_rejects_invalid_payloads(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // No validation failure may reach the mail API
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases: Vec<(&str, ContactFormBody, &str)> = vec![
        (
            "message below minimum length",
            ContactFormBody {
                message: Some("Hello".into()),
                ..ContactFormBody::valid()
            },
            "message",
        ),
        (
            "malformed email",
            ContactFormBody {
                email: Some("not-an-email".into()),
                ..ContactFormBody::valid()
            },
            "email",
        ),
        (
            "name with digits",
            ContactFormBody {
                first_name: Some("Jo3".into()),
                ..ContactFormBody::valid()
            },
            "firstName",
        ),
        (
            "subject below minimum length",
            ContactFormBody {
                subject: Some("Hey".into()),
                ..ContactFormBody::valid()
            },
            "subject",
        ),
    ];

    for (desc, form, field) in test_cases {
        let res = app
            .contact_create(&form)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not reject payload with {}",
            desc
        );

        let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
        assert_eq!(Some(false), body["success"].as_bool());

        let violated_fields: Vec<&str> = body["violations"]
            .as_array()
            .expect("Missing violations in response")
            .iter()
            .map(|violation| violation["field"].as_str().unwrap())
            .collect();
        assert!(
            violated_fields.contains(&field),
            "Violations for {} do not name {}: {:?}",
            desc,
            field,
            violated_fields
        );
    }

    // Nothing was stored either
    let submissions = SqliteSubmissionRepo::fetch_all(&pool, &SubmissionFilter::default())
        .await
        .expect("Failed to fetch stored submissions");
    assert!(submissions.is_empty());

    Ok(())
}

#[sqlx::test]
async fn short_message_rejection_cites_length_bounds(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = ContactFormBody {
        message: Some("Hello".into()),
        ..ContactFormBody::valid()
    };

    let res = app
        .contact_create(&form)
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    let reason = body["violations"][0]["reason"].as_str().unwrap();

    assert!(reason.contains("at least 10"));

    Ok(())
}

#[sqlx::test]
async fn contact_rejects_missing_fields(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = ContactFormBody {
        email: None,
        ..ContactFormBody::valid()
    };

    let res = app
        .contact_create(&form)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    Ok(())
}

#[sqlx::test]
async fn storage_failure_is_tolerated_when_notifications_succeed(
    pool: SqlitePool,
) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Take the store down
    pool.close().await;

    let res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(Some(true), body["success"].as_bool());
    assert!(body["data"]["id"].is_null());

    Ok(())
}

#[sqlx::test]
async fn storage_failure_fails_the_request_when_persistence_required(
    pool: SqlitePool,
) -> sqlx::Result<()> {
    let app = TestApp::spawn_with_policy(
        &pool,
        ContactSettings {
            require_persistence: true,
        },
    )
    .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // The flow must stop before notification delivery
        .expect(0)
        .mount(&app.email_server)
        .await;

    pool.close().await;

    let res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_server_error());

    Ok(())
}

#[sqlx::test]
async fn request_fails_when_nothing_succeeds(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.email_server)
        .await;

    pool.close().await;

    let res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_server_error());

    Ok(())
}

#[sqlx::test]
async fn partial_notification_failure_still_reports_success(pool: SqlitePool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    // Admin channel down, confirmation channel up
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(serde_json::json!({"To": OWNER_EMAIL})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_create(&ContactFormBody::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    Ok(())
}
