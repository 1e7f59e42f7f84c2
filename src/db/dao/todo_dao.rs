use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order, Set,
    TransactionTrait,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::TodoItem;
use crate::db::entities::todo_item;

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = TodoItem;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Fields accepted when inserting a row. `completed` always starts false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A partial update. `None` leaves a column alone; for nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    fn apply(self, active: &mut todo_item::ActiveModel) {
        if let Some(title) = self.title {
            active.title = Set(title);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(completed) = self.completed {
            active.completed = Set(completed);
        }
        if let Some(priority) = self.priority {
            active.priority = Set(priority);
        }
        if let Some(due_date) = self.due_date {
            active.due_date = Set(due_date);
        }
    }
}

impl TodoDao {
    pub async fn list_all(&self) -> DaoResult<Vec<todo_item::Model>> {
        self.find_all(Some((todo_item::Column::Id, Order::Asc))).await
    }

    pub async fn create(&self, new: NewTodo) -> DaoResult<todo_item::Model> {
        let model = todo_item::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            completed: Set(false),
            priority: Set(new.priority),
            due_date: Set(new.due_date),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(DaoLayerError::Db)
    }

    pub async fn get(&self, id: i32) -> DaoResult<todo_item::Model> {
        self.find_by_id(id).await
    }

    /// Looks the row up and writes the patch inside one transaction; the
    /// transaction rolls back if it is dropped before commit.
    pub async fn update(&self, id: i32, patch: TodoPatch) -> DaoResult<todo_item::Model> {
        let txn = self.db.begin().await?;

        let model = TodoItem::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            })?;

        if patch.is_empty() {
            txn.commit().await?;
            return Ok(model);
        }

        let mut active = model.into_active_model();
        patch.apply(&mut active);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DaoResult<()> {
        self.delete_by_id(id).await.map(|_| ())
    }
}
