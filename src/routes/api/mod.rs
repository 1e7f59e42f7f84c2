mod router;
pub mod todos;
pub mod translate;

pub use router::router;
