use sea_orm::{DatabaseConnection, EntityTrait, Order, PrimaryKeyTrait, QueryOrder};

use super::error::{DaoLayerError, DaoResult};

type Model<E> = <E as EntityTrait>::Model;
type Column<E> = <E as EntityTrait>::Column;

/// Shared reads and deletes for entities keyed by an integer id.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    type Entity: EntityTrait + Send + Sync;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    fn entity_name() -> &'static str {
        std::any::type_name::<Self::Entity>()
    }

    async fn find_all(
        &self,
        order: Option<(Column<Self::Entity>, Order)>,
    ) -> DaoResult<Vec<Model<Self::Entity>>> {
        let query = Self::Entity::find();
        let query = match order {
            Some((column, order)) => query.order_by(column, order),
            None => query,
        };
        query.all(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Model<Self::Entity>> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            })
    }

    async fn delete_by_id(&self, id: i32) -> DaoResult<i32> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            });
        }

        Ok(id)
    }
}
