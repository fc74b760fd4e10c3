//! Service layer for the to-do backend.
//! - `todo`: CRUD orchestration over an injected `TodoRepository`, plus the entity → DTO mapper.
//! - `auth`: credential classification, authorization decisions and the delete gate.
//! - `storage`: small file-backed helpers used by the local repository.

pub mod auth;
pub mod errors;
pub mod storage;
pub mod todo;
