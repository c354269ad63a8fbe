use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use tasknest::auth::AuthMiddleware;
use tasknest::config::Config;
use tasknest::routes;
use tasknest::routes::health;
use uuid::Uuid;

async fn setup() -> (PgPool, Config) {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to apply migrations");

    let config = Config {
        database_url,
        jwt_secret: "integration-test-secret".to_string(),
        server_port: 8080,
        server_host: "127.0.0.1".to_string(),
    };
    (pool, config)
}

fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

async fn cleanup_user(pool: &PgPool, username: &str) {
    // Tasks cascade with the owning user.
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

macro_rules! test_app {
    ($pool:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($config.clone()))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(
                    web::scope("/api")
                        .wrap(AuthMiddleware::new($config.jwt_secret.clone()))
                        .configure(routes::config),
                ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let (pool, config) = setup().await;
    let app = test_app!(pool, config);

    let username = unique_username("flow");

    // Register a new user
    let req_register = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": username,
            "password": "Password123!"
        }))
        .to_request();
    let resp_register = test::call_service(&app, req_register).await;
    assert_eq!(
        resp_register.status(),
        actix_web::http::StatusCode::CREATED,
        "registration should answer 201"
    );
    let register_body = test::read_body(resp_register).await;
    assert!(register_body.is_empty(), "registration returns no body");

    // Login with the same credentials
    let req_login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "username": username,
            "password": "Password123!"
        }))
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);
    let login_body: serde_json::Value = test::read_body_json(resp_login).await;
    let token = login_body["token"]
        .as_str()
        .expect("login response must contain a token")
        .to_string();

    // The token must be usable on a protected route
    let req_list = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header((
            actix_web::http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        ))
        .to_request();
    let resp_list = test::call_service(&app, req_list).await;
    assert_eq!(resp_list.status(), actix_web::http::StatusCode::OK);

    cleanup_user(&pool, &username).await;
}

#[actix_rt::test]
async fn test_duplicate_registration_conflict() {
    let (pool, config) = setup().await;
    let app = test_app!(pool, config);

    let username = unique_username("dup");

    let payload = json!({
        "username": username,
        "password": "FirstPassword1"
    });

    let req_first = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp_first = test::call_service(&app, req_first).await;
    assert_eq!(resp_first.status(), actix_web::http::StatusCode::CREATED);

    // Second registration with the same username must conflict,
    // even with a different password.
    let req_second = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": username,
            "password": "OtherPassword2"
        }))
        .to_request();
    let resp_second = test::call_service(&app, req_second).await;
    assert_eq!(resp_second.status(), actix_web::http::StatusCode::CONFLICT);

    // The first user's record is unaffected: the original password still logs in.
    let req_login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(&payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);

    cleanup_user(&pool, &username).await;
}

#[actix_rt::test]
async fn test_login_failure_modes_are_indistinguishable() {
    let (pool, config) = setup().await;
    let app = test_app!(pool, config);

    let username = unique_username("parity");

    let req_register = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": username,
            "password": "RightPassword1"
        }))
        .to_request();
    let resp_register = test::call_service(&app, req_register).await;
    assert_eq!(resp_register.status(), actix_web::http::StatusCode::CREATED);

    // Known username, wrong password
    let req_wrong_password = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "username": username,
            "password": "WrongPassword1"
        }))
        .to_request();
    let resp_wrong_password = test::call_service(&app, req_wrong_password).await;

    // Username that was never registered
    let req_unknown_user = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "username": unique_username("ghost"),
            "password": "AnyPassword1"
        }))
        .to_request();
    let resp_unknown_user = test::call_service(&app, req_unknown_user).await;

    // Both must answer 401 so account existence cannot be probed.
    assert_eq!(
        resp_wrong_password.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        resp_unknown_user.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );

    cleanup_user(&pool, &username).await;
}
