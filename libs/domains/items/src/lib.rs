//! Items Domain
//!
//! The item catalog and the comment log. Items belong to an owner, may answer
//! an item request, and are returned with their comments and, for the owner,
//! the surrounding approved bookings.
//!
//! [`ItemCatalog`] exposes the catalog to the bookings and requests crates
//! through the ports they declare.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use catalog::ItemCatalog;
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    Comment, CommentResponse, CreateComment, CreateItem, Item, ItemResponse, LinkedBooking,
    NewComment, NewItem, UpdateItem,
};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
