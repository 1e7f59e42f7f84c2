use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub priority: Option<String>,
    pub due_date: Option<Date>,
}

impl ActiveModelBehavior for ActiveModel {}
