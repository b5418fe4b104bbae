use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Every route of the application
pub fn configure_routes() -> Router {
    // ========================================
    // PROTECTED: bearer session required
    // ========================================
    let protected = Router::new()
        .route("/api/system/auth/me", get(system::handlers::auth::me))
        // A001 Bidder lookup and edits
        .route("/api/auctions", get(handlers::a001_bidder::list_auctions))
        .route("/api/auctions/bidder", get(handlers::a001_bidder::get_bidder))
        .route(
            "/api/auctions/update",
            post(handlers::a001_bidder::update_bidder),
        )
        // A003 Invoice PDFs
        .route(
            "/api/auctions/invoice",
            get(handlers::a003_invoice::get_invoice),
        )
        // A002 Outstanding shipments
        .route("/api/shipments/list", get(handlers::a002_shipment::list))
        .route("/api/shipments/item", get(handlers::a002_shipment::get_item))
        .route(
            "/api/shipments/item/update",
            post(handlers::a002_shipment::update_item),
        )
        .route("/api/shipments/diag", get(handlers::a002_shipment::diag))
        .route_layer(middleware::from_fn(
            system::auth::middleware::require_auth,
        ));

    // ========================================
    // PUBLIC
    // ========================================
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .merge(protected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::system::auth::{install_for_tests, jwt, TEST_PASSWORD};

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        install_for_tests();
        let response = configure_routes().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn assert_failure(status: StatusCode, body: &Value, expected: StatusCode) {
        assert_eq!(status, expected);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_protected_routes_require_a_token() {
        for uri in ["/api/auctions", "/api/shipments/list", "/api/system/auth/me"] {
            let (status, body) = send(get(uri, None)).await;
            assert_failure(status, &body, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_bad_tokens_are_unauthorized() {
        let secret = &install_for_tests().jwt_secret;
        let (expired, _) = jwt::generate_access_token(secret, -2).unwrap();
        let (foreign, _) = jwt::generate_access_token("another-secret", 1).unwrap();

        for token in [expired.as_str(), foreign.as_str(), "not-a-jwt"] {
            let (status, body) = send(get("/api/auctions", Some(token))).await;
            assert_failure(status, &body, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let secret = &install_for_tests().jwt_secret;
        let (token, _) = jwt::generate_access_token(secret, 1).unwrap();

        let (status, body) = send(get("/api/system/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["session"]["subject"], json!(jwt::STAFF_SUBJECT));
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let login = json!({ "password": TEST_PASSWORD }).to_string();
        let (status, body) = send(post_json("/api/system/auth/login", &login)).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["accessToken"].as_str().unwrap().to_string();

        let (status, _) = send(get("/api/system/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);

        let wrong = json!({ "password": "guess" }).to_string();
        let (status, body) = send(post_json("/api/system/auth/login", &wrong)).await;
        assert_failure(status, &body, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_the_error_envelope() {
        for payload in ["{", "{}", r#"{"password": 42}"#] {
            let (status, body) = send(post_json("/api/system/auth/login", payload)).await;
            assert_failure(status, &body, StatusCode::BAD_REQUEST);
        }

        let request = Request::post("/api/system/auth/login")
            .body(Body::from(r#"{"password":"x"}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_failure(status, &body, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_uses_the_error_envelope() {
        let secret = &install_for_tests().jwt_secret;
        let (token, _) = jwt::generate_access_token(secret, 1).unwrap();

        let uri = "/api/shipments/item?sheetId=s1&rowNumber=abc";
        let (status, body) = send(get(uri, Some(&token))).await;
        assert_failure(status, &body, StatusCode::BAD_REQUEST);
    }
}
