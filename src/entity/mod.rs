//! SeaORM entity definitions for PostgreSQL database.

pub mod audit_log;
pub mod profile;
pub mod stripe_customer;
pub mod subscription;
pub mod user_role;
