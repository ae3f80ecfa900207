mod context;
pub mod todo_service;
pub mod user_service;

pub use context::ServiceContext;
