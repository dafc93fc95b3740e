//! Shared E2E test helpers.

pub mod fixture;
pub mod journal;
pub mod mock_packager;
pub mod mock_transfer;
