pub mod context;
pub mod todo_service;
pub mod translation;

pub use context::ServiceContext;
