mod common;

use uuid::Uuid;

#[tokio::test]
async fn duplicate_name_gets_suffixed_slug() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;
    app.register_identity("t-bob", "bob-id", "bob").await;

    let first = app
        .submit_product("t-alice", common::product_body("My App"))
        .await;
    let second = app
        .submit_product("t-bob", common::product_body("My App"))
        .await;

    assert_eq!(first["item"]["slug"], "my-app");
    let second_slug = second["item"]["slug"].as_str().unwrap();
    assert_ne!(second_slug, "my-app");
    assert!(second_slug.starts_with("my-app-"));
    assert_eq!(second_slug.len(), "my-app-".len() + 4);
}

#[tokio::test]
async fn submit_rejects_invalid_payloads() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;
    app.sign_in("t-alice").await;

    for body in [
        serde_json::json!({ "name": "", "tagline": "t", "url": "https://example.com" }),
        serde_json::json!({ "name": "App", "tagline": "t", "url": "not-a-url" }),
        serde_json::json!({
            "name": "App", "tagline": "t", "url": "https://example.com",
            "logo_url": "file:///etc/passwd",
        }),
    ] {
        let response = app
            .api_client
            .post(format!("{}/products", app.address))
            .bearer_auth("t-alice")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(400, response.status().as_u16(), "body: {}", body);
    }

    // unauthenticated submission is rejected outright
    let response = app
        .api_client
        .post(format!("{}/products", app.address))
        .json(&common::product_body("App"))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn edit_is_owner_gated_and_preserves_slug() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;
    app.register_identity("t-bob", "bob-id", "bob").await;
    app.sign_in("t-bob").await;

    let product = app
        .submit_product("t-alice", common::product_body("Editable"))
        .await;
    let slug = product["item"]["slug"].as_str().unwrap().to_string();

    let mut edited = common::product_body("Renamed Entirely");
    edited["tags"] = serde_json::json!("ai, web3");

    // a stranger may not edit
    let response = app
        .api_client
        .put(format!("{}/products/{}", app.address, slug))
        .bearer_auth("t-bob")
        .json(&edited)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(403, response.status().as_u16());

    // the owner may; the slug survives the rename
    let response = app
        .api_client
        .put(format!("{}/products/{}", app.address, slug))
        .bearer_auth("t-alice")
        .json(&edited)
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["item"]["name"], "Renamed Entirely");
    assert_eq!(body["item"]["slug"], slug);
    assert_eq!(body["item"]["tags"], serde_json::json!(["ai", "web3"]));
}

#[tokio::test]
async fn delete_cascades_to_votes_and_comments() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;
    app.register_identity("t-bob", "bob-id", "bob").await;

    let product = app
        .submit_product("t-alice", common::product_body("Doomed"))
        .await;
    let id = product["item"]["id"].as_str().unwrap().to_string();
    let slug = product["item"]["slug"].as_str().unwrap().to_string();
    let product_uuid = Uuid::parse_str(&id).unwrap();

    let response = app.toggle_vote("t-bob", &id).await;
    assert!(response.status().is_success());

    let response = app
        .api_client
        .post(format!("{}/comments", app.address))
        .bearer_auth("t-bob")
        .json(&serde_json::json!({ "product_id": id, "content": "rip" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());

    let response = app
        .api_client
        .delete(format!("{}/products/{}", app.address, slug))
        .bearer_auth("t-alice")
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let votes = launchboard::db::vote::fetch_by_product(&app.db_pool, product_uuid)
        .await
        .unwrap();
    let comments = launchboard::db::comment::fetch_by_product(&app.db_pool, product_uuid)
        .await
        .unwrap();
    assert!(votes.is_empty());
    assert!(comments.is_empty());

    // voting on the dead product is a 404 now
    let response = app.toggle_vote("t-bob", &id).await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn status_change_is_admin_only() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;
    app.register_identity("t-admin", "admin-id", "boss").await;
    app.sign_in("t-admin").await;
    app.promote_admin("admin-id").await;

    let product = app
        .submit_product("t-alice", common::product_body("Contested"))
        .await;
    let id = product["item"]["id"].as_str().unwrap().to_string();
    let slug = product["item"]["slug"].as_str().unwrap().to_string();

    // the owner is not a moderator
    let response = app
        .api_client
        .put(format!("{}/admin/products/{}/status", app.address, id))
        .bearer_auth("t-alice")
        .json(&serde_json::json!({ "status": "rejected" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(403, response.status().as_u16());

    let response = app
        .api_client
        .put(format!("{}/admin/products/{}/status", app.address, id))
        .bearer_auth("t-admin")
        .json(&serde_json::json!({ "status": "rejected" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    // a verdict cannot return a product to pending
    let response = app
        .api_client
        .put(format!("{}/admin/products/{}/status", app.address, id))
        .bearer_auth("t-admin")
        .json(&serde_json::json!({ "status": "pending" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());

    let body = app.get_json(&format!("/products/{}", slug)).await;
    assert_eq!(body["item"]["status"], "rejected");

    let listing = app.get_json("/products").await;
    assert!(listing["list"].as_array().unwrap().is_empty());

    // the moderation queue still shows it, and only to admins
    let response = app
        .api_client
        .get(format!("{}/admin/products", app.address))
        .bearer_auth("t-admin")
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["list"].as_array().unwrap().len(), 1);
    assert_eq!(body["list"][0]["status"], "rejected");

    let response = app
        .api_client
        .get(format!("{}/admin/products", app.address))
        .bearer_auth("t-alice")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(403, response.status().as_u16());
}
