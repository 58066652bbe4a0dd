//! Item Requests Domain
//!
//! Users post requests for items they want but cannot find. Items created
//! in answer reference the request, and every request is returned with those
//! items attached.
//!
//! Items live in another crate, so this one only declares the
//! [`RequestItemsSource`] port and lets the application plug the catalog in.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use handlers::ApiDoc;
pub use models::{CreateItemRequest, ItemRequest, ItemRequestResponse, RequestItem};
pub use postgres::PgRequestRepository;
pub use repository::{InMemoryRequestRepository, RequestItemsSource, RequestRepository};
pub use service::RequestService;
