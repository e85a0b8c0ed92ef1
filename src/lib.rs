//! Sitecrew account server library.
//!
//! Core functionality for the account lifecycle and entitlement service:
//! guarded account deletion, audit logging, subscription reconciliation,
//! and entitlement reads.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
pub mod store;
