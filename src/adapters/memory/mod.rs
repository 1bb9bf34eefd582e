//! In-memory adapters.
//!
//! `InMemoryStore` implements every storage port over a single lock. It
//! backs the HTTP integration tests and local runs without PostgreSQL,
//! where it is seeded from a `Fixture`.

mod fixture;
mod store;

pub use fixture::{AttendeeFixture, Fixture, HotelFixture, RoomFixture, TicketFixture};
pub use store::InMemoryStore;
