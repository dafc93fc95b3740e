//! Browser automation for lifecheck.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`BrowserError`, `WaitPhase`)
//! - [`locator`]: XPath text locators (`Locator`)
//! - [`browser`]: `Browser` trait and `ElementHandle`
//! - [`wait`]: Two-phase, deadline-bounded element waits (`WaitPolicy`)
//! - [`webdriver`]: W3C WebDriver client (`WebDriverBrowser`)
//! - [`service`]: Local driver service process (`DriverService`)

pub mod browser;
pub mod error;
pub mod locator;
pub mod service;
pub mod wait;
pub mod webdriver;

pub use browser::{Browser, ElementHandle};
pub use error::{BrowserError, WaitPhase};
pub use locator::Locator;
pub use service::DriverService;
pub use wait::{WaitPolicy, wait_for_element, wait_for_present, wait_for_visible};
pub use webdriver::WebDriverBrowser;
