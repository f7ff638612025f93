use launchboard::configuration::{get_configuration, DatabaseSettings};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub auth_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    // Wires a bearer token to an identity on the mocked OAuth endpoint.
    // The user row itself is created by the first authenticated request.
    pub async fn register_identity(&self, token: &str, id: &str, username: &str) {
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": id,
                "name": username,
                "username": username,
                "avatar_url": null,
            })))
            .mount(&self.auth_server)
            .await;
    }

    // Any authenticated request upserts the user; the cheapest one is
    // the board listing.
    pub async fn sign_in(&self, token: &str) {
        let response = self
            .api_client
            .get(format!("{}/products", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success());
    }

    pub async fn promote_admin(&self, user_id: &str) {
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to promote user");
    }

    pub async fn submit_product(&self, token: &str, body: serde_json::Value) -> serde_json::Value {
        let response = self
            .api_client
            .post(format!("{}/products", self.address))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(201, response.status().as_u16(), "submit should succeed");
        response.json().await.expect("invalid response body")
    }

    pub async fn toggle_vote(&self, token: &str, product_id: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/products/{}/shit", self.address, product_id))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let response = self
            .api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success(), "GET {} failed", path);
        response.json().await.expect("invalid response body")
    }
}

pub fn product_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "tagline": "Does one thing well",
        "url": "https://example.com",
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let auth_server = MockServer::start().await;
    configuration.auth_url = format!("{}/me", auth_server.uri());
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = launchboard::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        auth_server,
        api_client: reqwest::Client::new(),
    })
}
