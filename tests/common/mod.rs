#![allow(dead_code)]

use actix_web::web;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use attendance_api::config::Config;
use attendance_api::database::init_database;
use attendance_api::database::models::{User, UserRole};
use attendance_api::handlers::shared::ApiResponse;
use attendance_api::{AuthService, ReportRepository, UserRepository};

pub const TEST_PASSWORD: &str = "password123";

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

pub struct TestContext {
    pub db: TestDb,
    pub config: Config,
    pub auth_service: AuthService,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let config = test_config();
        let auth_service = AuthService::new(UserRepository::new(db.pool.clone()), config.clone());

        Ok(TestContext {
            db,
            config,
            auth_service,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn config_data(&self) -> web::Data<Config> {
        web::Data::new(self.config.clone())
    }

    pub fn auth_service_data(&self) -> web::Data<AuthService> {
        web::Data::new(self.auth_service.clone())
    }

    pub fn report_repo_data(&self) -> web::Data<ReportRepository> {
        web::Data::new(ReportRepository::new(self.db.pool.clone()))
    }

    pub fn token_for(&self, user: &User) -> String {
        self.auth_service
            .generate_token(user)
            .expect("Failed to create test token")
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        jwt_expiration_hours: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
    }
}

// Helper functions
pub async fn create_test_user(pool: &SqlitePool, name: &str, role: UserRole) -> User {
    // Lowest bcrypt cost keeps the suite fast
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash password");
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let now = Utc::now().naive_utc();

    let id = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to insert test user")
    .last_insert_rowid();

    User {
        id,
        name: name.to_string(),
        email,
        password_hash,
        role,
        created_at: now,
    }
}

pub async fn create_test_client(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO clients (name, address) VALUES (?, ?)")
        .bind(name)
        .bind(format!("{} Street", name))
        .execute(pool)
        .await
        .expect("Failed to insert test client")
        .last_insert_rowid()
}

pub async fn create_test_checkin(
    pool: &SqlitePool,
    employee_id: i64,
    client_id: i64,
    checkin_time: &str,
    checkout_time: Option<&str>,
) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO checkins (employee_id, client_id, checkin_time, checkout_time)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(client_id)
    .bind(checkin_time)
    .bind(checkout_time)
    .execute(pool)
    .await
    .expect("Failed to insert test checkin")
    .last_insert_rowid()
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

// Test assertion helpers
pub fn assert_success_response<T>(body: &[u8]) -> T
where
    T: serde::de::DeserializeOwned,
{
    let response: ApiResponse<T> =
        serde_json::from_slice(body).expect("Failed to parse JSON response");

    assert!(
        response.success,
        "Expected successful response but got error: {:?}",
        response.message
    );
    response.data.expect("Expected data in successful response")
}

pub fn assert_error_response(body: &[u8], expected_message: &str) {
    let response: serde_json::Value =
        serde_json::from_slice(body).expect("Failed to parse JSON response");

    assert_eq!(response["success"], false);
    assert_eq!(response["message"], expected_message);
    assert!(response.get("data").is_none(), "error body carried data");
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
