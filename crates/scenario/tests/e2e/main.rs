//! End-to-end scenario tests against simulated collaborators.
//!
//! The packaging system, browser and file transfer are replaced by in-memory
//! fakes that share one journal, so tests can assert the exact interleaving of
//! commands, page visits and uploads.
//!
//! # Test Structure
//!
//! - `helpers/` -- Journal, fake fleet, fake browser, fake transfer, runner builder
//! - `scenarios/` -- Test files organized by scenario
//!
//! # Running
//!
//! ```bash
//! cargo test -p lifecheck-scenario --test e2e
//! ```

mod helpers;
mod scenarios;
