//! Tollgate Testing Infrastructure
//!
//! Deterministic fixtures shared by the authenticator test suites: seeded
//! ed25519 keys, a builder for signed transactions, and an in-memory balance
//! ledger that counts its reads.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! tollgate-testkit = { path = "../tollgate-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use tollgate_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let alice = KeyTestFixture::from_seed_string("alice");
//!     let tx = TxBuilder::new()
//!         .message(alice.message("/bank.MsgSend"))
//!         .sign(&alice)
//!         .build();
//!     // ... test logic
//! }
//! ```

pub mod bank;
pub mod keys;
pub mod tx;

pub use bank::MemoryBank;
pub use keys::{test_keys_seeded, KeyTestFixture};
pub use tx::TxBuilder;

/// Install a `tracing` subscriber for tests, honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
