//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: shared in-process tables used without a database
//!
//! Adapters translate between domain rows and storage representations. They
//! contain no business logic.

pub mod memory;
pub mod persistence;
