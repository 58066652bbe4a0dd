//! Sea-ORM entities for the `items` and `comments` tables.

pub mod comment;
pub mod item;
