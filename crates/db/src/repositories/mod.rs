//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod staff_repo;
pub mod ticket_repo;

pub use category_repo::CategoryRepo;
pub use staff_repo::StaffRepo;
pub use ticket_repo::TicketRepo;
