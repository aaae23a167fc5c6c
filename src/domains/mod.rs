//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools`: the Tool resource, its storage backends and CRUD endpoints
//! - `catalog`: discover, management and add-tool views over the Tool list

pub mod catalog;
pub mod tools;
