//! Users Domain
//!
//! The user registry: create, read, update and delete users with a unique
//! email. Other domains resolve callers and authors through
//! [`UserRepository`].
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users endpoints
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← validation, NotFound/Duplicate rules
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory + PostgreSQL
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
