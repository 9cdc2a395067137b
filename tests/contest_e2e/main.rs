//! Contest E2E test suite.
//!
//! Drives the real actix app against in-memory SQLite (same migrations as
//! production), a temp-dir asset store and stub generation backends.
//!
//! Run with: cargo test --test contest_e2e


mod test_contest;
mod test_designs;
mod test_generation;
mod test_share;
mod test_uploads;
