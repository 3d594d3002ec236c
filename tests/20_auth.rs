mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// These flows need Postgres behind the server; they skip when DATABASE_URL
// is not set in the environment.

#[tokio::test]
async fn register_then_login_round_trip() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("donor");

    // Fresh registration succeeds
    let res = client
        .post(format!("{}/registration", server.base_url))
        .json(&json!({
            "username": "dora",
            "email": email,
            "password": "pw1",
            "user_type": "donor"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], json!(true));

    // Duplicate registration conflicts and does not alter the first account
    let res = client
        .post(format!("{}/registration", server.base_url))
        .json(&json!({
            "username": "imposter",
            "email": email,
            "password": "other",
            "user_type": "donor"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The original credentials still log in
    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": email, "password": "pw1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = common::session_cookie(&res).expect("login sets session cookie");
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["user_type"], json!("donor"));

    // The session reaches the matching dashboard
    let res = client
        .get(format!("{}/donor/dashboard", server.base_url))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["user"]["email"], json!(email));

    // ...but not another role's dashboard
    let res = client
        .get(format!("{}/receiver/dashboard", server.base_url))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn login_failures_are_distinct() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("receiver");

    let res = client
        .post(format!("{}/registration", server.base_url))
        .json(&json!({
            "username": "rhea",
            "email": email,
            "password": "pw2",
            "user_type": "receiver"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Unknown email
    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": common::unique_email("nobody"), "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Wrong password; the message stays credential-neutral
    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], json!("Invalid credentials"));

    Ok(())
}

#[tokio::test]
async fn logout_invalidates_the_session() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("donor");

    client
        .post(format!("{}/registration", server.base_url))
        .json(&json!({
            "username": "dora",
            "email": email,
            "password": "pw1",
            "user_type": "donor"
        }))
        .send()
        .await?;

    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": email, "password": "pw1" }))
        .send()
        .await?;
    let cookie = common::session_cookie(&res).expect("login sets session cookie");

    let res = client
        .get(format!("{}/logout", server.base_url))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // The old token no longer authorizes anything
    let res = client
        .get(format!("{}/donor/dashboard", server.base_url))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
