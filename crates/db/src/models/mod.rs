//! Database entity models and DTOs.

pub mod category;
pub mod staff;
pub mod ticket;
