use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use configs::AppConfig;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.normalize_and_validate()?;
    let app = server::startup::build_app(&cfg).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_and_get_user() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/user", app.base_url))
        .json(&json!({"name": "Ada", "email": "ada@example.com"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let res = c.get(format!("{}/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!({"id": id, "name": "Ada", "email": "ada@example.com"})
    );

    let res = c.get(format!("{}/user/does-not-exist", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"error": "User not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_same_input_twice_gives_two_users() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let res = c.post(format!("{}/user", app.base_url))
            .body(r#"{"name":"Ada","email":"ada@example.com"}"#)
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        ids.push(res.json::<serde_json::Value>().await?["id"].as_str().unwrap_or_default().to_string());
    }
    assert_ne!(ids[0], ids[1]);
    for id in &ids {
        let res = c.get(format!("{}/user/{}", app.base_url, id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_is_500() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/user", app.base_url))
        .body("not json")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    Ok(())
}
