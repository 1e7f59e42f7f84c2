use crate::{
    db::dao::{DaoLayerError, NewTodo, TodoDao, TodoPatch},
    db::entities::todo_item,
    error::AppError,
};

const NOT_FOUND_MESSAGE: &str = "To-Do item not found";

#[derive(Clone, Copy)]
enum TodoOp {
    Fetch,
    Create,
    Update,
    Delete,
}

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list_all(&self) -> Result<Vec<todo_item::Model>, AppError> {
        self.todo_dao
            .list_all()
            .await
            .map_err(|err| map_error(TodoOp::Fetch, err))
    }

    pub async fn get(&self, id: i32) -> Result<todo_item::Model, AppError> {
        self.todo_dao
            .get(id)
            .await
            .map_err(|err| map_error(TodoOp::Fetch, err))
    }

    pub async fn create(&self, new: NewTodo) -> Result<todo_item::Model, AppError> {
        self.todo_dao
            .create(new)
            .await
            .map_err(|err| map_error(TodoOp::Create, err))
    }

    pub async fn update(&self, id: i32, patch: TodoPatch) -> Result<todo_item::Model, AppError> {
        self.todo_dao
            .update(id, patch)
            .await
            .map_err(|err| map_error(TodoOp::Update, err))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.todo_dao
            .delete(id)
            .await
            .map_err(|err| map_error(TodoOp::Delete, err))
    }
}

// A store rejecting an insert is reported as a bad request; every other
// store failure is a server error.
fn map_error(op: TodoOp, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        DaoLayerError::Db(db_err) => match op {
            TodoOp::Create => AppError::bad_request(format!("Failed to create todo: {db_err}")),
            TodoOp::Fetch => AppError::internal(format!("Failed to fetch todos: {db_err}")),
            TodoOp::Update => AppError::internal(format!("Failed to update todo: {db_err}")),
            TodoOp::Delete => AppError::internal(format!("Failed to delete todo: {db_err}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::TodoService;
    use crate::db::dao::{DaoBase, NewTodo, TodoDao, TodoPatch};
    use crate::db::entities::todo_item;

    fn service(db: &sea_orm::DatabaseConnection) -> TodoService {
        TodoService::new(TodoDao::new(db))
    }

    #[tokio::test]
    async fn create_store_failure_is_a_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("value too long".to_string())])
            .into_connection();

        let err = service(&db)
            .create(NewTodo {
                title: "x".to_string(),
                ..NewTodo::default()
            })
            .await
            .expect_err("create should fail");

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Failed to create todo:"));
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo_item::Model>::new()])
            .into_connection();

        let err = service(&db)
            .update(
                1,
                TodoPatch {
                    completed: Some(true),
                    ..TodoPatch::default()
                },
            )
            .await
            .expect_err("update should fail");

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "To-Do item not found");
    }

    #[tokio::test]
    async fn update_store_failure_is_a_server_error() {
        let existing = todo_item::Model {
            id: 4,
            title: "Pay rent".to_string(),
            description: None,
            completed: false,
            priority: None,
            due_date: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .append_query_errors([DbErr::Custom("deadlock detected".to_string())])
            .into_connection();

        let err = service(&db)
            .update(
                4,
                TodoPatch {
                    completed: Some(true),
                    ..TodoPatch::default()
                },
            )
            .await
            .expect_err("update should fail");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Failed to update todo:"));
    }

    #[tokio::test]
    async fn delete_store_failure_is_a_server_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = service(&db).delete(5).await.expect_err("delete should fail");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Failed to delete todo:"));
    }
}
