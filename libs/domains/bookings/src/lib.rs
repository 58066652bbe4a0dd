//! Bookings Domain
//!
//! The booking workflow: a user books someone else's item for a date range,
//! the owner approves or rejects it, and both sides list their bookings
//! filtered by state relative to the current time.
//!
//! Items are owned by another crate; this one reaches them through the
//! [`BookableItems`] port.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{
    BookedItem, Booking, BookingResponse, BookingState, BookingStatus, CreateBooking, NewBooking,
};
pub use postgres::PgBookingRepository;
pub use repository::{BookableItems, BookingRepository, InMemoryBookingRepository};
pub use service::BookingService;
