mod common;

use uuid::Uuid;

async fn set_launch_date(app: &common::TestApp, id: &str, days_ago: i64) {
    let date = chrono::Utc::now().date_naive() - chrono::Duration::days(days_ago);
    sqlx::query("UPDATE products SET launch_date = $2 WHERE id = $1")
        .bind(Uuid::parse_str(id).unwrap())
        .bind(date)
        .execute(&app.db_pool)
        .await
        .expect("Failed to set launch date");
}

async fn set_count(app: &common::TestApp, id: &str, count: i32) {
    sqlx::query("UPDATE products SET shit_count = $2 WHERE id = $1")
        .bind(Uuid::parse_str(id).unwrap())
        .bind(count)
        .execute(&app.db_pool)
        .await
        .expect("Failed to set count");
}

#[tokio::test]
async fn board_groups_by_date_and_ranks_by_count() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;

    let mut ids = Vec::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta", "Old Timer"] {
        let product = app
            .submit_product("t-alice", common::product_body(name))
            .await;
        ids.push(product["item"]["id"].as_str().unwrap().to_string());
    }

    // today: counts 5, 3, 3, 1 — yesterday: one product
    for (id, count) in ids.iter().zip([5, 3, 3, 1]) {
        set_count(&app, id, count).await;
    }
    set_launch_date(&app, &ids[4], 1).await;
    set_count(&app, &ids[4], 7).await;

    let body = app.get_json("/products").await;
    let groups = body["list"].as_array().unwrap();
    assert_eq!(groups.len(), 2);

    let today_counts: Vec<i64> = groups[0]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["shit_count"].as_i64().unwrap())
        .collect();
    assert_eq!(today_counts, vec![5, 3, 3, 1]);
    assert_eq!(groups[1]["products"][0]["name"], "Old Timer");

    // repeated calls with no writes keep the tie order stable
    let again = app.get_json("/products").await;
    assert_eq!(body["list"], again["list"]);

    // a specific date narrows the board to that single day
    let today = chrono::Utc::now().date_naive();
    let body = app.get_json(&format!("/products?date={}", today)).await;
    let groups = body["list"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["products"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn trending_window_excludes_old_launches() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;

    let recent = app
        .submit_product("t-alice", common::product_body("Fresh"))
        .await;
    let stale = app
        .submit_product("t-alice", common::product_body("Stale"))
        .await;
    let recent_id = recent["item"]["id"].as_str().unwrap().to_string();
    let stale_id = stale["item"]["id"].as_str().unwrap().to_string();

    set_launch_date(&app, &recent_id, 2).await;
    set_launch_date(&app, &stale_id, 10).await;

    let body = app.get_json("/products/trending?period=week").await;
    let names: Vec<&str> = body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Fresh"));
    assert!(!names.contains(&"Stale"));

    let body = app.get_json("/products/trending?period=all").await;
    assert_eq!(body["list"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_matches_name_and_tagline_substrings() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;

    app.submit_product("t-alice", common::product_body("SuperTool"))
        .await;
    app.submit_product(
        "t-alice",
        serde_json::json!({
            "name": "Other",
            "tagline": "A supercharged workflow",
            "url": "https://example.com",
        }),
    )
    .await;
    app.submit_product("t-alice", common::product_body("Unrelated"))
        .await;

    let body = app.get_json("/products/search?q=super").await;
    let names: Vec<&str> = body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"SuperTool"));
    assert!(names.contains(&"Other"));

    // a blank query is not a search
    let body = app.get_json("/products/search?q=").await;
    assert!(body["list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn facet_filters_are_conjunctive_and_derived_sorted() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;

    app.submit_product(
        "t-alice",
        serde_json::json!({
            "name": "Cursor App",
            "tagline": "t",
            "url": "https://example.com",
            "agent": "Cursor",
            "llm": "GPT-4",
            "tags": "ai,saas",
        }),
    )
    .await;
    app.submit_product(
        "t-alice",
        serde_json::json!({
            "name": "Lovable App",
            "tagline": "t",
            "url": "https://example.com",
            "agent": "Lovable",
            "tags": "ai",
        }),
    )
    .await;

    let body = app.get_json("/products?agent=Cursor&tag=ai").await;
    let groups = body["list"].as_array().unwrap();
    assert_eq!(groups[0]["products"].as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["products"][0]["name"], "Cursor App");

    let body = app.get_json("/products?agent=Cursor&tag=web3").await;
    assert!(body["list"].as_array().unwrap().is_empty());

    let body = app.get_json("/products/filters").await;
    assert_eq!(
        body["item"]["agents"],
        serde_json::json!(["Cursor", "Lovable"])
    );
    assert_eq!(body["item"]["llms"], serde_json::json!(["GPT-4"]));
    assert_eq!(body["item"]["tags"], serde_json::json!(["ai", "saas"]));
}

#[tokio::test]
async fn pending_products_hidden_from_listings_but_reachable_by_slug() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    app.register_identity("t-alice", "alice-id", "alice").await;

    let product = app
        .submit_product("t-alice", common::product_body("Quiet Launch"))
        .await;
    let id = product["item"]["id"].as_str().unwrap().to_string();
    let slug = product["item"]["slug"].as_str().unwrap().to_string();

    sqlx::query("UPDATE products SET status = 'pending' WHERE id = $1")
        .bind(Uuid::parse_str(&id).unwrap())
        .execute(&app.db_pool)
        .await
        .unwrap();

    let body = app.get_json("/products").await;
    assert!(body["list"].as_array().unwrap().is_empty());

    let body = app.get_json("/products/trending?period=all").await;
    assert!(body["list"].as_array().unwrap().is_empty());

    let body = app.get_json("/products/search?q=quiet").await;
    assert!(body["list"].as_array().unwrap().is_empty());

    // the direct link still resolves
    let body = app.get_json(&format!("/products/{}", slug)).await;
    assert_eq!(body["item"]["status"], "pending");
}
