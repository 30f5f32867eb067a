/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - auth / content / user / risk-assessment を 1 箇所に集める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    auth::{login, register},
    content::{create_content, delete_content, get_content, list_content, update_content},
    health::health,
    risk::evaluate,
    user::{profile, update_profile},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/content", get(list_content).post(create_content))
        .route(
            "/content/{content_id}",
            get(get_content).put(update_content).delete(delete_content),
        )
        .route("/user/profile", get(profile))
        .route("/user/update", post(update_profile))
        .route("/risk-assessment/evaluate", post(evaluate))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::routes;
    use crate::repos::content_repo::testing::InMemoryContentRepo;
    use crate::repos::user_repo::testing::InMemoryUserRepo;
    use crate::services::auth::auth_service::AuthService;
    use crate::services::content_service::ContentService;
    use crate::services::id_codec::IdCodec;
    use crate::services::risk::evaluator::{RiskEvaluator, RiskResult};
    use crate::services::user_service::UserService;
    use crate::state::AppState;

    #[derive(Default)]
    struct MockRiskEvaluator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RiskEvaluator for MockRiskEvaluator {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn evaluate(&self, inquiry: Value) -> RiskResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"grade": "B", "echo": inquiry}))
        }
    }

    struct Harness {
        app: Router,
        users: Arc<InMemoryUserRepo>,
        risk: Arc<MockRiskEvaluator>,
    }

    fn harness() -> Harness {
        let users = Arc::new(InMemoryUserRepo::new());
        let content = Arc::new(InMemoryContentRepo::new());
        let risk = Arc::new(MockRiskEvaluator::default());

        let id_codec = IdCodec::new(
            10,
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
        )
        .unwrap();

        let state = AppState::new(
            Arc::new(AuthService::new(users.clone())),
            Arc::new(UserService::new(users.clone())),
            Arc::new(ContentService::new(content)),
            risk.clone(),
            id_codec,
        );

        Harness {
            app: Router::new().nest("/api", routes()).with_state(state),
            users,
            risk,
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn malformed_login_bodies_fail_fast_without_repo_calls() {
        let h = harness();

        for body in [
            json!({"password": "correctpw"}),
            json!({"email": "not-an-email", "password": "correctpw"}),
            json!({"email": "a@b.com", "password": "short"}),
        ] {
            let (status, body) = send(&h.app, "POST", "/api/auth/login", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(body["status"], 400);
        }

        assert_eq!(h.users.calls(), 0);
    }

    #[tokio::test]
    async fn login_failures_do_not_reveal_account_existence() {
        let h = harness();
        send(
            &h.app,
            "POST",
            "/api/auth/register",
            Some(json!({"email": "a@b.com", "password": "correctpw"})),
        )
        .await;

        let (unknown_status, unknown_body) = send(
            &h.app,
            "POST",
            "/api/auth/login",
            Some(json!({"email": "nobody@b.com", "password": "correctpw"})),
        )
        .await;
        let (wrong_status, wrong_body) = send(
            &h.app,
            "POST",
            "/api/auth/login",
            Some(json!({"email": "a@b.com", "password": "wrong-pw"})),
        )
        .await;

        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_body, wrong_body);
        assert_eq!(unknown_body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn login_round_trip_returns_the_user_body() {
        let h = harness();
        send(
            &h.app,
            "POST",
            "/api/auth/register",
            Some(json!({"email": "a@b.com", "password": "correctpw", "name": "Arezoo"})),
        )
        .await;

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/auth/login",
            Some(json!({"email": "a@b.com", "password": "correctpw"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "a@b.com");
        assert_eq!(body["user"]["name"], "Arezoo");
        assert!(body["user"]["id"].is_string());
    }

    #[tokio::test]
    async fn registering_the_same_email_twice_conflicts() {
        let h = harness();
        let payload = json!({"email": "a@b.com", "password": "correctpw"});

        let (first_status, first_body) =
            send(&h.app, "POST", "/api/auth/register", Some(payload.clone())).await;
        assert_eq!(first_status, StatusCode::CREATED);
        assert!(first_body["user"]["id"].is_string());

        let (second_status, second_body) =
            send(&h.app, "POST", "/api/auth/register", Some(payload)).await;
        assert_eq!(second_status, StatusCode::CONFLICT);
        assert_eq!(second_body["error"]["code"], "CONFLICT");
        assert_eq!(second_body["status"], 409);
    }

    #[tokio::test]
    async fn content_crud_round_trip() {
        let h = harness();
        let author = uuid::Uuid::new_v4().to_string();

        let (status, created) = send(
            &h.app,
            "POST",
            "/api/content",
            Some(json!({"title": "گزارش اعتباری", "body": "متن", "author_id": author})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let public_id = created["id"].as_str().unwrap().to_string();
        assert!(public_id.len() >= 10);

        let (status, fetched) = send(&h.app, "GET", &format!("/api/content/{public_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "گزارش اعتباری");
        assert_eq!(fetched["published"], false);

        let (status, updated) = send(
            &h.app,
            "PUT",
            &format!("/api/content/{public_id}"),
            Some(json!({"body": null, "published": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["body"], Value::Null);
        assert_eq!(updated["published"], true);

        let (status, _) = send(&h.app, "DELETE", &format!("/api/content/{public_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, missing) = send(&h.app, "GET", &format!("/api/content/{public_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn content_list_is_newest_first_and_empty_for_unknown_author() {
        let h = harness();
        let author = uuid::Uuid::new_v4().to_string();

        for title in ["first", "second"] {
            send(
                &h.app,
                "POST",
                "/api/content",
                Some(json!({"title": title, "author_id": author})),
            )
            .await;
        }

        let (status, listed) =
            send(&h.app, "GET", &format!("/api/content?author_id={author}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["title"], "second");
        assert_eq!(listed[1]["title"], "first");

        let unknown = uuid::Uuid::new_v4();
        let (status, empty) =
            send(&h.app, "GET", &format!("/api/content?author_id={unknown}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));
    }

    #[tokio::test]
    async fn garbage_public_id_is_a_validation_error() {
        let h = harness();
        let (status, body) = send(&h.app, "GET", "/api/content/!!bad!!", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn profile_round_trip_and_missing_user() {
        let h = harness();
        let (_, registered) = send(
            &h.app,
            "POST",
            "/api/auth/register",
            Some(json!({"email": "a@b.com", "password": "correctpw"})),
        )
        .await;
        let user_id = registered["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/user/update",
            Some(json!({"user_id": user_id, "first_name": "آرزو", "last_name": "کریمی"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["first_name"], "آرزو");

        let (status, body) = send(
            &h.app,
            "GET",
            &format!("/api/user/profile?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "a@b.com");
        assert_eq!(body["user"]["last_name"], "کریمی");

        let missing = uuid::Uuid::new_v4();
        let (status, body) = send(
            &h.app,
            "GET",
            &format!("/api/user/profile?user_id={missing}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn risk_evaluation_validates_before_delegating() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/risk-assessment/evaluate",
            Some(json!({"national_id": "123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(h.risk.calls.load(Ordering::SeqCst), 0);

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/risk-assessment/evaluate",
            Some(json!({"national_id": "0012345678", "mobile": "09121234567"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grade"], "B");
        assert_eq!(h.risk.calls.load(Ordering::SeqCst), 1);
    }
}
