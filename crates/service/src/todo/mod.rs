//! To-do CRUD: entity → DTO mapper, repository abstraction and the orchestrating service.

pub mod mapper;
pub mod repo;
pub mod repository;
pub mod service;

pub use repository::TodoRepository;
pub use service::{DynTodoService, TodoService};
