//! Browser abstraction for testability.
//!
//! The [`Browser`] trait is the narrow capability set the scenario uses:
//! navigate, find an element, check its visibility, clear cookies, quit.
//! Waiting is built on top in [`crate::wait`]. Production code uses
//! [`WebDriverBrowser`](crate::webdriver::WebDriverBrowser); tests use `MockBrowser`.

use std::future::Future;

use crate::error::BrowserError;
use crate::locator::Locator;

/// Opaque reference to an element in the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(pub String);

/// Browser capabilities used by the lifecycle scenario.
pub trait Browser: Send + Sync {
    /// Loads `url` in the current window and waits for the page load to finish.
    fn navigate(&self, url: &str) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Looks up the first element matching `locator` without waiting.
    ///
    /// Returns `Ok(None)` when nothing matches.
    fn find_element(
        &self,
        locator: &Locator,
    ) -> impl Future<Output = Result<Option<ElementHandle>, BrowserError>> + Send;

    /// Whether a previously located element is rendered visibly.
    fn is_displayed(
        &self,
        element: &ElementHandle,
    ) -> impl Future<Output = Result<bool, BrowserError>> + Send;

    /// Deletes every cookie visible to the current session.
    fn clear_cookies(&self) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Ends the session. Calling it twice is a no-op.
    fn quit(&self) -> impl Future<Output = Result<(), BrowserError>> + Send;
}

/// 테스트용 Mock 브라우저
///
/// 페이지 상태를 스크립트로 지정합니다. `find_element`가 몇 번째 호출에서
/// 요소를 찾게 될지, `is_displayed`가 언제 true가 될지를 설정할 수 있습니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockBrowser {
    /// 찾기 시도 횟수가 이 값에 도달하면 요소가 나타남 (None이면 끝까지 없음)
    pub present_after: Option<usize>,
    /// 가시성 확인 횟수가 이 값에 도달하면 보임 (None이면 끝까지 숨김)
    pub visible_after: Option<usize>,
    /// find_element 호출 횟수
    pub find_calls: std::sync::atomic::AtomicUsize,
    /// is_displayed 호출 횟수
    pub display_calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockBrowser {
    /// 첫 시도부터 요소가 있고 보이는 mock을 만듭니다.
    pub fn ready() -> Self {
        Self {
            present_after: Some(1),
            visible_after: Some(1),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Browser for MockBrowser {
    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn find_element(&self, _locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        use std::sync::atomic::Ordering;
        let n = self.find_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(match self.present_after {
            Some(after) if n >= after => Some(ElementHandle("el-1".to_owned())),
            _ => None,
        })
    }

    async fn is_displayed(&self, _element: &ElementHandle) -> Result<bool, BrowserError> {
        use std::sync::atomic::Ordering;
        let n = self.display_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(matches!(self.visible_after, Some(after) if n >= after))
    }

    async fn clear_cookies(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        Ok(())
    }
}
