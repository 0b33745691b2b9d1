use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{health::health, protected, public};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Full router: `/health` at the root, everything else under `/api/v1`.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", public_routes().merge(protected_routes(state.clone())))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(public::login))
        .route("/register", post(public::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{notes, projects, tasks};

    Router::new()
        // Projects
        .route("/projects/create-new-project", post(projects::create_new_project))
        .route("/projects/get-projects-by-user-ID", get(projects::get_projects_by_user_id))
        .route("/projects/get-project-by-ID/:projectID", get(projects::get_project_by_id))
        .route("/projects/update-project-by-ID/:projectID", put(projects::update_project_by_id))
        .route("/projects/delete-project-by-ID/:projectID", delete(projects::delete_project_by_id))
        // Tasks
        .route("/tasks/create-new-task", post(tasks::create_new_task))
        .route(
            "/tasks/get-tasks-by-linked-project-ID/:projectID",
            get(tasks::get_tasks_by_linked_project_id),
        )
        .route("/tasks/get-task-by-ID/:taskID", get(tasks::get_task_by_id))
        .route("/tasks/update-task-by-ID/:taskID", put(tasks::update_task_by_id))
        .route("/tasks/delete-task-by-ID/:taskID", delete(tasks::delete_task_by_id))
        // Notes
        .route("/notes/create-new-note", post(notes::create_new_note))
        .route(
            "/notes/get-notes-by-linked-project-ID/:projectID",
            get(notes::get_notes_by_linked_project_id),
        )
        .route("/notes/get-notes-by-ID/:noteID", get(notes::get_note_by_id))
        .route("/notes/update-note-by-ID/:noteID", put(notes::update_note_by_id))
        .route("/notes/delete-note-by-ID/:noteID", delete(notes::delete_note_by_id))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::auth::TokenService;
    use crate::database::MemoryStore;

    fn test_app() -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            TokenService::new("router-test-secret", 60),
        );
        app(state, &["http://localhost:3000".to_string()])
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let res = test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        for uri in [
            "/api/v1/projects/get-projects-by-user-ID",
            "/api/v1/tasks/get-task-by-ID/not-even-a-uuid",
            "/api/v1/notes/get-notes-by-ID/00000000-0000-0000-0000-000000000000",
        ] {
            let res = test_app().oneshot(get(uri)).await.unwrap();
            assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", uri);
        }
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let res = test_app().oneshot(get("/api/v1/nothing-here")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let req = Request::builder()
            .uri("/health")
            .header("Origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(
            res.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }
}
