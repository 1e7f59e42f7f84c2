#[allow(unused_imports)]
pub mod prelude {
    pub use super::todo_item::Entity as TodoItem;
}

pub mod todo_item;
