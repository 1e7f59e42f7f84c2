use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::{
    db::dao::{NewTodo, TodoPatch},
    db::entities::todo_item,
    error::AppError,
    response::{ApiResponse, ApiResult},
    services::{ServiceContext, todo_service::TodoService},
    state::AppState,
};

const MAX_PRIORITY_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Every field is optional; a key that is present with `null` is kept
/// apart from a key that is absent.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Serialize)]
pub struct TodoItemResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoItemResponse>> {
    let todos = todo_service(&state).list_all().await?;
    info!(count = todos.len(), "fetched todos");
    ApiResponse::ok(todos.into_iter().map(TodoItemResponse::from).collect())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<TodoItemResponse> {
    let todo = todo_service(&state).get(id).await?;
    ApiResponse::ok(todo.into())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<TodoItemResponse> {
    let new = body.into_new_todo()?;
    let todo = todo_service(&state).create(new).await?;
    info!(id = todo.id, "created todo");
    ApiResponse::created(todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<TodoItemResponse> {
    let patch = body.into_patch()?;
    let todo = todo_service(&state).update(id, patch).await?;
    info!(id, "updated todo");
    ApiResponse::ok(todo.into())
}

async fn delete_todo(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    todo_service(&state).delete(id).await?;
    info!(id, "deleted todo");
    ApiResponse::no_content()
}

impl CreateTodoRequest {
    fn into_new_todo(self) -> Result<NewTodo, AppError> {
        check_title(&self.title)?;
        if let Some(priority) = self.priority.as_deref() {
            check_priority(priority)?;
        }
        Ok(NewTodo {
            title: self.title,
            description: self.description,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

impl UpdateTodoRequest {
    fn into_patch(self) -> Result<TodoPatch, AppError> {
        let title = match self.title {
            None => None,
            Some(None) => return Err(AppError::bad_request("Title cannot be null")),
            Some(Some(title)) => {
                check_title(&title)?;
                Some(title)
            }
        };
        let completed = match self.completed {
            None => None,
            Some(None) => return Err(AppError::bad_request("Completed cannot be null")),
            Some(Some(completed)) => Some(completed),
        };
        if let Some(Some(priority)) = self.priority.as_ref() {
            check_priority(priority)?;
        }

        Ok(TodoPatch {
            title,
            description: self.description,
            completed,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Whitespace-only titles are rejected; accepted titles are stored as sent.
fn check_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::bad_request("Title required"));
    }
    Ok(())
}

fn check_priority(priority: &str) -> Result<(), AppError> {
    if priority.chars().count() > MAX_PRIORITY_CHARS {
        return Err(AppError::bad_request(format!(
            "Priority must be at most {MAX_PRIORITY_CHARS} characters"
        )));
    }
    Ok(())
}

impl From<todo_item::Model> for TodoItemResponse {
    fn from(model: todo_item::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            priority: model.priority,
            due_date: model.due_date,
        }
    }
}

fn todo_service(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
