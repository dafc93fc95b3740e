//! E2E test scenarios.

mod failures;
mod lifecycle;
mod move_location;
mod restore;
mod update;
