pub mod errors;
pub mod todo;

pub use todo::{CreateTodoItem, Todo, TodoItem, UpdateTodoItem};
