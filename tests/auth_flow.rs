//! End-to-end checks of bearer authentication over a real Actix app.

use actix_web::{App, HttpResponse, test, web};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::SecretString;

use encodelab_lib::auth::{AuthUser, TokenVerifier};

const SECRET: &str = "integration-test-secret";

fn issue_token(uid: i32, role: &str) -> String {
    let claims = serde_json::json!({
        "sub": "alice",
        "uid": uid,
        "role": role,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn whoami(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "id": auth.user.id,
        "username": auth.user.username,
        "role": auth.user.role.as_str(),
    }))
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(TokenVerifier::new(SecretString::from(
                    SECRET,
                ))))
                .route("/whoami", web::get().to(whoami)),
        )
        .await
    };
}

#[actix_rt::test]
async fn missing_token_is_rejected() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn valid_token_resolves_caller() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", issue_token(7, "user"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
}

#[actix_rt::test]
async fn pending_account_is_rejected() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header((
            "Authorization",
            format!("Bearer {}", issue_token(7, "pending")),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn tampered_token_is_rejected() {
    let app = test_app!();

    let mut token = issue_token(7, "super_admin");
    token.push('x');

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
