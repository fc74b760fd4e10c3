use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use configs::{AuthConfig, BearerPolicy};
use models::TodoItem;
use server::routes;
use server::state::AppState;
use service::auth::Authorizer;
use service::todo::repository::mock::MockTodoRepository;
use service::todo::{TodoRepository, TodoService};

fn app_with(items: Vec<TodoItem>, auth: AuthConfig) -> (Arc<MockTodoRepository>, Router) {
    let repo = Arc::new(MockTodoRepository::with_items(items));
    let dyn_repo: Arc<dyn TodoRepository> = repo.clone();
    let state = AppState::new(Arc::new(TodoService::new(dyn_repo)), Authorizer::from_config(&auth));
    (repo, routes::build_router(state, CorsLayer::very_permissive()))
}

fn app(items: Vec<TodoItem>) -> (Arc<MockTodoRepository>, Router) {
    app_with(items, AuthConfig::default())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn graphql(app: &Router, token: Option<&str>, query: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    let req = builder.body(Body::from(json!({ "query": query }).to_string())).unwrap();
    let (status, bytes) = send(app, req).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_public() {
    let (_repo, app) = app(vec![]);
    let (status, bytes) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn graphiql_page_is_public() {
    let (_repo, app) = app(vec![]);
    let (status, bytes) = send(&app, Request::get("/graphql").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&bytes).contains("graphiql"));
}

#[tokio::test]
async fn unauthorized_requests_never_reach_the_store() {
    let (repo, app) = app(vec![TodoItem::new("1", "t", "d", Utc::now())]);
    for token in [None, Some(""), Some("invalid-token"), Some("Bearer nope")] {
        let (status, _) = graphql(&app, token, "{ listTodos { id } }").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{token:?}");
    }
    assert_eq!(repo.calls().total(), 0);
}

#[tokio::test]
async fn user_can_create_read_and_update() {
    let (_repo, app) = app(vec![]);
    let (status, body) = graphql(
        &app,
        Some("valid-token"),
        r#"mutation { createTodo(title: "Buy milk", description: "2 litres") { id completed createdAt updatedAt } }"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = &body["data"]["createTodo"];
    assert_eq!(created["completed"], false);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, body) = graphql(&app, Some("Bearer valid-token"), &format!(r#"{{ getTodoById(id: "{id}") {{ title }} }}"#)).await;
    assert_eq!(body["data"]["getTodoById"]["title"], "Buy milk");

    let (_, body) = graphql(
        &app,
        Some("valid-token"),
        &format!(r#"mutation {{ updateTodo(id: "{id}", title: "Buy oat milk", description: "1 litre", completed: true) {{ id title completed }} }}"#),
    )
    .await;
    assert_eq!(body["data"]["updateTodo"]["completed"], true);
    assert_eq!(body["data"]["updateTodo"]["id"], id.as_str());

    let (_, body) = graphql(&app, Some("valid-token"), "{ listTodos { title } }").await;
    assert_eq!(body["data"]["listTodos"], json!([{ "title": "Buy oat milk" }]));
}

#[tokio::test]
async fn missing_item_reads_as_null() {
    let (_repo, app) = app(vec![]);
    let (_, body) = graphql(&app, Some("valid-token"), r#"{ getTodoById(id: "nope") { id } }"#).await;
    assert_eq!(body["data"]["getTodoById"], Value::Null);
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn update_of_missing_item_is_not_found() {
    let (repo, app) = app(vec![]);
    let (_, body) = graphql(
        &app,
        Some("valid-token"),
        r#"mutation { updateTodo(id: "ghost", title: "t", description: "d", completed: false) { id } }"#,
    )
    .await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
    assert_eq!(repo.calls().mutations(), 0);
}

#[tokio::test]
async fn delete_is_admin_only() {
    let (repo, app) = app(vec![TodoItem::new("1", "t", "d", Utc::now())]);

    for id in ["1", "missing"] {
        let (_, body) = graphql(&app, Some("valid-token"), &format!(r#"mutation {{ deleteTodo(id: "{id}") {{ id }} }}"#)).await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "FORBIDDEN");
        assert_eq!(body["errors"][0]["extensions"]["errorType"], "AuthorizationError");
    }
    assert_eq!(repo.calls().total(), 0);

    let (_, body) = graphql(&app, Some("Bearer admin-token"), r#"mutation { deleteTodo(id: "1") { id title } }"#).await;
    assert_eq!(body["data"]["deleteTodo"]["id"], "1");
    assert!(repo.stored("1").is_none());
}

#[tokio::test]
async fn required_policy_rejects_bare_tokens() {
    let auth = AuthConfig { bearer_prefix: BearerPolicy::Required, ..AuthConfig::default() };
    let (_repo, app) = app_with(vec![], auth);
    let (status, _) = graphql(&app, Some("valid-token"), "{ listTodos { id } }").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = graphql(&app, Some("Bearer valid-token"), "{ listTodos { id } }").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let (repo, app) = app(vec![]);
    repo.fail_with("ProvisionedThroughputExceededException");
    let (status, body) = graphql(&app, Some("valid-token"), "{ listTodos { id } }").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errors"][0]["extensions"]["code"], "INTERNAL");
    assert_eq!(body["errors"][0]["message"], "internal error");
}

#[tokio::test]
async fn metrics_are_exposed() {
    let (_repo, app) = app(vec![]);
    graphql(&app, Some("valid-token"), "{ listTodos { id } }").await;
    let (status, bytes) = send(&app, Request::get("/metrics").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&bytes).contains("todo_graphql_requests_total"));
}
