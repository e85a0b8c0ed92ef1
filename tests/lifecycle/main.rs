//! Account lifecycle test suite.
//!
//! Exercises account deletion, subscription reconciliation and entitlement
//! reads against an in-memory store and mocked providers. No database or
//! network access is required.
//!
//! Run with: cargo test --test lifecycle

mod mock_store;

mod test_billing_sync;
mod test_entitlements;
