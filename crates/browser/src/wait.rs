//! Deadline-bounded element waits.
//!
//! [`wait_for_element`] is two-phase: first wait until the locator matches an
//! element, then wait until that element is visible. Each phase gets the full
//! timeout on its own deadline, so a page that never renders the element can
//! take up to twice the timeout to fail.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use lifecheck_core::config::BrowserConfig;

use crate::browser::{Browser, ElementHandle};
use crate::error::{BrowserError, WaitPhase};
use crate::locator::Locator;

/// Timeout and polling cadence for one wait phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Budget for each phase
    pub timeout: Duration,
    /// Delay between checks
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(config.timeout(), config.poll_interval())
    }

    fn timeout_error(&self, phase: WaitPhase, locator: &Locator) -> BrowserError {
        BrowserError::Timeout {
            phase,
            locator: locator.to_string(),
            timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Sleeps until the next poll, or returns false if the deadline has passed.
    async fn pause(&self, deadline: Instant) -> bool {
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        true
    }
}

/// Polls until `locator` matches an element.
pub async fn wait_for_present<B: Browser>(
    browser: &B,
    locator: &Locator,
    policy: &WaitPolicy,
) -> Result<ElementHandle, BrowserError> {
    let deadline = Instant::now() + policy.timeout;
    loop {
        if let Some(element) = browser.find_element(locator).await? {
            debug!(locator = %locator, "element present");
            return Ok(element);
        }
        if !policy.pause(deadline).await {
            warn!(locator = %locator, "element never appeared");
            return Err(policy.timeout_error(WaitPhase::Present, locator));
        }
    }
}

/// Polls until `element` (found via `locator`) is displayed.
pub async fn wait_for_visible<B: Browser>(
    browser: &B,
    element: &ElementHandle,
    locator: &Locator,
    policy: &WaitPolicy,
) -> Result<(), BrowserError> {
    let deadline = Instant::now() + policy.timeout;
    loop {
        if browser.is_displayed(element).await? {
            debug!(locator = %locator, "element visible");
            return Ok(());
        }
        if !policy.pause(deadline).await {
            warn!(locator = %locator, "element never became visible");
            return Err(policy.timeout_error(WaitPhase::Visible, locator));
        }
    }
}

/// Waits for `locator` to be present, then visible.
pub async fn wait_for_element<B: Browser>(
    browser: &B,
    locator: &Locator,
    policy: &WaitPolicy,
) -> Result<(), BrowserError> {
    let element = wait_for_present(browser, locator, policy).await?;
    wait_for_visible(browser, &element, locator, policy).await
}
