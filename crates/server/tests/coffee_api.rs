mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{app, delete, get, json, send, token, with_bearer};

fn latte() -> serde_json::Value {
    json!({
        "title": "Latte",
        "recipe": [
            { "name": "milk", "color": "grey", "parts": 3 },
            { "name": "coffee", "color": "brown", "parts": 1 }
        ]
    })
}

#[tokio::test]
async fn gate_rejections_are_unauthorized() -> anyhow::Result<()> {
    let t = app().await?;

    let r = send(&t.router, get("/drinks-detail")).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.json()["code"], "authorization_header_missing");

    let mut req = get("/drinks-detail");
    req.headers_mut().insert("authorization", "Token abc".parse()?);
    assert_eq!(send(&t.router, req).await.json()["code"], "invalid_header");

    let r = send(&t.router, with_bearer(get("/drinks-detail"), "not.a.jwt")).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);

    let expired = token(&["get:drinks-detail"], -3600);
    let r = send(&t.router, with_bearer(get("/drinks-detail"), &expired)).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.json()["code"], "token_expired");

    let wrong_perm = token(&["post:drinks"], 600);
    let r = send(&t.router, with_bearer(get("/drinks-detail"), &wrong_perm)).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.json()["code"], "unauthorized");

    let ok = token(&["get:drinks-detail"], 600);
    let r = send(&t.router, with_bearer(get("/drinks-detail"), &ok)).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.json(), json!({ "success": true, "drinks": [] }));
    Ok(())
}

#[tokio::test]
async fn drink_lifecycle() -> anyhow::Result<()> {
    let t = app().await?;
    let manager = token(&["get:drinks-detail", "post:drinks", "patch:drinks", "delete:drinks"], 600);

    let r = send(&t.router, json("POST", "/drinks", &latte())).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);

    let r = send(&t.router, with_bearer(json("POST", "/drinks", &latte()), &manager)).await;
    assert_eq!(r.status, StatusCode::OK);
    let id = r.json()["drinks"][0]["id"].as_i64().unwrap_or_default();
    assert_eq!(r.json()["drinks"][0]["recipe"][1]["name"], "coffee");

    let dup = send(&t.router, with_bearer(json("POST", "/drinks", &latte()), &manager)).await;
    assert_eq!(dup.status, StatusCode::UNPROCESSABLE_ENTITY);

    let menu = send(&t.router, get("/drinks")).await;
    assert_eq!(menu.json()["drinks"][0]["recipe"][0], json!({ "color": "grey", "parts": 3 }));

    let single = json!({ "title": "Flat White", "recipe": { "name": "milk", "color": "white", "parts": 1 } });
    let r = send(&t.router, with_bearer(json("PATCH", &format!("/drinks/{id}"), &single), &manager)).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.json()["drinks"][0]["title"], "Flat White");
    assert_eq!(r.json()["drinks"][0]["recipe"].as_array().map(Vec::len), Some(1));

    let r = send(&t.router, with_bearer(json("PATCH", "/drinks/999", &single), &manager)).await;
    assert_eq!(r.status, StatusCode::NOT_FOUND);

    let r = send(&t.router, with_bearer(delete(&format!("/drinks/{id}")), &manager)).await;
    assert_eq!(r.json(), json!({ "success": true, "delete": id }));
    let r = send(&t.router, with_bearer(delete(&format!("/drinks/{id}")), &manager)).await;
    assert_eq!(r.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_requires_its_own_permission() -> anyhow::Result<()> {
    let t = app().await?;
    let barista = token(&["get:drinks-detail", "patch:drinks"], 600);
    let r = send(&t.router, with_bearer(delete("/drinks/1"), &barista)).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn missing_title_is_bad_request() -> anyhow::Result<()> {
    let t = app().await?;
    let manager = token(&["post:drinks"], 600);
    let body = json!({ "recipe": [{ "name": "water", "color": "blue", "parts": 1 }] });
    let r = send(&t.router, with_bearer(json("POST", "/drinks", &body), &manager)).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    Ok(())
}
