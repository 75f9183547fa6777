//! Shared test utilities for exoscope integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Fixtures are deterministic; anything time-sensitive is
//! written to work under `tokio::time::pause()`.

pub mod assertions;
pub mod builders;
pub mod fake_archive_api;
pub mod fixtures;
pub mod observers;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use observers::*;
