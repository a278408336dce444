//! Domain types persisted in `PostgreSQL`.
//!
//! These are validated domain objects, separate from database row types
//! (`db` module) and wire DTOs (`routes` module). Catalogue products are
//! never persisted; their types live in [`crate::catalogue`].

pub mod deletion_log;
pub mod favourite;
pub mod reservation;
pub mod user;

pub use deletion_log::DeletionLog;
pub use favourite::FavouriteSet;
pub use reservation::Reservation;
pub use user::User;
