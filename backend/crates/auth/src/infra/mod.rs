//! Infrastructure Layer
//!
//! User lookup adapters.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
