/// Database models for Tasklane
///
/// This module contains the database models, their CRUD operations, and the
/// task listing query builder.
///
/// # Models
///
/// - `user`: User accounts (registration, lookup by normalized email)
/// - `task`: Owned task records with ownership-scoped read/update/delete
/// - `query`: Listing parameters resolved into a scoped query plan
pub mod query;
pub mod task;
pub mod user;
