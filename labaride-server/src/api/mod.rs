//! API routes for labaride-server

pub mod auth;
pub mod catalog;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod shops;
pub mod users;
pub mod ws;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::error::AppError;
use shared::models::Shop;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::UserIdentity;
use crate::auth::rate_limit::{login_rate_limit, signup_rate_limit};
use crate::auth::user_auth_middleware;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Login/signup (rate limited per client IP)
    let login = Router::new()
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));
    let signup = Router::new()
        .route("/signup", post(auth::signup))
        .route_layer(middleware::from_fn_with_state(state.clone(), signup_rate_limit));

    // Public (no auth)
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/test-connection", get(health::test_connection))
        .route("/verify_token", post(auth::verify_token))
        .route("/shops", get(shops::list_shops))
        .route("/shops/recent", get(shops::recent_shops))
        // Token travels as ?token= (browsers cannot set headers on upgrade)
        .route("/ws", get(ws::handle_ws));

    // Bearer token required
    let protected = Router::new()
        // Users
        .route("/user/{user_id}", get(users::get_user))
        .route("/user/{user_id}/has_shop", get(users::has_shop))
        .route("/update_user_details/{user_id}", put(users::update_details))
        .route("/update_password/{user_id}", put(users::update_password))
        .route("/delete_account/{user_id}", axum::routing::delete(users::delete_account))
        // Shops
        .route("/register_shop/{user_id}", post(shops::register_shop))
        .route("/shop/{shop_id}", get(shops::get_shop).put(shops::update_shop))
        // Catalog
        .route("/shop/services", get(catalog::all_services))
        .route("/shop/items", get(catalog::all_household_items))
        .route("/shop/{shop_id}/services", get(catalog::list_services))
        .route("/shop/{shop_id}/service", post(catalog::create_service))
        .route(
            "/shop/service/{service_id}",
            put(catalog::update_service).delete(catalog::delete_service),
        )
        .route(
            "/shop/{shop_id}/household",
            get(catalog::list_household_items).post(catalog::create_household_item),
        )
        .route("/shop/household/{item_id}", put(catalog::update_household_price))
        .route(
            "/shop/{shop_id}/clothing",
            get(catalog::list_clothing_types).post(catalog::create_clothing_type),
        )
        .route("/shop/clothing/{type_id}", put(catalog::update_clothing_price))
        .route("/shop/{shop_id}/kilo-prices", get(catalog::list_kilo_prices))
        .route(
            "/shop/{shop_id}/kilo-price",
            post(catalog::create_kilo_price).delete(catalog::delete_kilo_price),
        )
        // Orders
        .route("/create_transaction/{user_id}", post(orders::create_transaction))
        .route("/transaction/{transaction_id}", get(orders::get_transaction))
        .route("/user_transactions/{user_id}", get(orders::user_transactions))
        .route("/shop_transactions/{shop_id}", get(orders::shop_transactions))
        .route("/api/orders", get(orders::query_orders))
        .route("/api/orders/{order_id}/set_price", put(orders::set_price))
        .route("/api/orders/{order_id}/decline", put(orders::decline))
        .route(
            "/update_transaction_status/{transaction_id}",
            put(orders::update_status),
        )
        .route("/cancel_transaction/{transaction_id}", put(orders::cancel))
        // Notifications
        .route("/api/notifications/{user_id}", get(notifications::list))
        .route(
            "/api/notifications/{notification_id}/read",
            put(notifications::mark_read),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            user_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(login)
        .merge(signup)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Non-blank trimmed value of a required field
pub(crate) fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::required(field))
}

/// Load a shop and check the caller owns it
pub(crate) async fn owned_shop(
    state: &AppState,
    shop_id: i64,
    identity: &UserIdentity,
) -> ServiceResult<Shop> {
    let shop = db::shops::find_by_id(&state.pool, shop_id)
        .await?
        .ok_or_else(|| AppError::new(shared::ErrorCode::ShopNotFound))?;
    if shop.user_id != identity.user_id {
        return Err(AppError::forbidden("You do not own this shop").into());
    }
    Ok(shop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";

    /// Router over a pool that never connects; only DB-free paths are exercised
    fn app() -> Router {
        let config = Config {
            database_url: "postgres://labaride@localhost/labaride_test".into(),
            http_port: 0,
            environment: "test".into(),
            jwt_secret: SECRET.into(),
            jwt_expiry_hours: 1,
            db_max_connections: 1,
            db_timeout: Duration::from_millis(50),
            db_retries: 0,
            ws_session_buffer: 8,
        };
        let pool = PgPoolOptions::new()
            .acquire_timeout(config.db_timeout)
            .connect_lazy(&config.database_url)
            .unwrap();
        create_router(AppState::with_pool(pool, &config))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn required_trims_and_names_the_field() {
        assert_eq!(required(Some("  Ana "), "name").unwrap(), "Ana");
        let err = required(Some("   "), "name").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::RequiredField);
        assert_eq!(err.message, "Missing name");
        let err = required(None, "email").unwrap_err();
        assert_eq!(err.details.unwrap()["field"], "email");
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "labaride-server");
    }

    #[tokio::test]
    async fn protected_routes_need_a_token() {
        let response = app()
            .oneshot(Request::get("/user/5").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], shared::ErrorCode::NotAuthenticated.code());
    }

    #[tokio::test]
    async fn foreign_token_is_rejected() {
        let token = crate::auth::create_token(5, "ana@example.com", "other-secret", 1).unwrap();
        let response = app()
            .oneshot(
                Request::put("/api/orders/1/decline")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn other_users_account_is_forbidden() {
        let token = crate::auth::create_token(5, "ana@example.com", SECRET, 1).unwrap();
        let response = app()
            .oneshot(
                Request::get("/user/6")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn verify_token_reports_identity() {
        let token = crate::auth::create_token(5, "ana@example.com", SECRET, 1).unwrap();
        let response = app()
            .oneshot(
                Request::post("/verify_token")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["user_id"], 5);
        assert_eq!(body["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn signup_validates_before_touching_the_database() {
        let response = app()
            .oneshot(
                Request::post("/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Ana", "email": "ana@example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["details"]["field"], "password");
    }
}
