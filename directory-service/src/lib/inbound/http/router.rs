use std::sync::Arc;

use auth::Authenticator;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::follow_user::follow_user;
use super::handlers::get_user::get_user;
use super::handlers::list_followers::list_followers;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::unfollow_user::unfollow_user;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::log_request;
use crate::domain::user::service::UserService;
use crate::user::ports::UserRepository;

pub struct AppState<UR: UserRepository> {
    pub user_service: Arc<UserService<UR>>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
            jwt_expiration_hours: self.jwt_expiration_hours,
        }
    }
}

/// Declarative description of a single HTTP operation.
///
/// The method is bound inside the method router (`get(...)`, `post(...)`);
/// `requires_authentication` decides whether the authentication stage is
/// composed into the route's pipeline.
pub struct Route<UR: UserRepository> {
    pub path: &'static str,
    pub handler: MethodRouter<AppState<UR>>,
    pub requires_authentication: bool,
}

/// The service's route table. Login is the only public operation.
fn routes<UR: UserRepository>() -> Vec<Route<UR>> {
    vec![
        Route {
            path: "/login",
            handler: post(login::<UR>),
            requires_authentication: false,
        },
        Route {
            path: "/users",
            handler: post(create_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users",
            handler: get(list_users::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id",
            handler: get(get_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id",
            handler: put(update_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id",
            handler: delete(delete_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id/follow",
            handler: post(follow_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id/unfollow",
            handler: post(unfollow_user::<UR>),
            requires_authentication: true,
        },
        Route {
            path: "/users/:user_id/followers",
            handler: get(list_followers::<UR>),
            requires_authentication: true,
        },
    ]
}

/// Build the application router from the route table.
///
/// Each flagged route gets the authentication middleware wrapped directly
/// around its handler; the logging middleware is layered over the whole
/// application afterwards, so it is always the outermost stage and runs
/// exactly once per request, rejected ones included.
pub fn create_router<UR: UserRepository>(
    user_service: Arc<UserService<UR>>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        jwt_expiration_hours,
    };

    let mut router = Router::new();
    for route in routes::<UR>() {
        let handler = if route.requires_authentication {
            route.handler.route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware::<UR>,
            ))
        } else {
            route.handler
        };
        router = router.route(route.path, handler);
    }

    router
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
