//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryNewsRepository;
pub use postgres::PgNewsRepository;
