use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handlers;
use crate::middleware::{handle_panic, jwt_auth, request_logger};
use crate::state::AppState;

/// Build the application router: protected user CRUD behind the JWT
/// middleware, unprotected health/token endpoints, and the global
/// recovery + logging layers around everything.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/user", axum::routing::post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route(
            "/user/:id",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route_layer(from_fn_with_state(state.clone(), jwt_auth));

    let public = Router::new()
        .route("/healthz", get(handlers::healthz::healthz))
        .route("/token/generate", get(handlers::token::generate_token));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(axum::middleware::from_fn(request_logger)),
        )
        .with_state(state)
}
