//! Domain types and pure business logic for the QuickDesk help-desk.
//!
//! This crate is I/O-free: everything here operates on in-memory values so
//! the ticket lifecycle, comment visibility, and vote rules can be unit
//! tested without a database or HTTP stack. The `db` and `api` crates build
//! on these types.

pub mod category;
pub mod comment;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod ticket;
pub mod types;
pub mod vote;
