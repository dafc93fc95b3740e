//! W3C WebDriver client.
//!
//! Speaks the JSON-over-HTTP protocol directly with `reqwest`. Only the
//! endpoints the [`Browser`] trait needs are implemented:
//!
//! | Operation | Endpoint |
//! |---|---|
//! | new session | `POST /session` |
//! | navigate | `POST /session/{id}/url` |
//! | find element | `POST /session/{id}/element` |
//! | is displayed | `GET /session/{id}/element/{eid}/displayed` |
//! | clear cookies | `DELETE /session/{id}/cookie` |
//! | quit | `DELETE /session/{id}` |

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{Client, Method};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use lifecheck_core::config::BrowserConfig;

use crate::browser::{Browser, ElementHandle};
use crate::error::BrowserError;
use crate::locator::Locator;

/// W3C element reference key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
/// Pre-W3C element reference key, still sent by some drivers.
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// A live WebDriver session.
pub struct WebDriverBrowser {
    client: Client,
    base_url: String,
    session_id: String,
    closed: AtomicBool,
}

impl WebDriverBrowser {
    /// Opens a new session on the driver at `config.webdriver_url`.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let client = Client::new();
        let base_url = config.webdriver_url.trim_end_matches('/').to_owned();

        let response = client
            .post(format!("{base_url}/session"))
            .json(&session_request(config))
            .send()
            .await?;
        let value = read_value(response).await?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| BrowserError::UnexpectedResponse(format!("no sessionId in {value}")))?
            .to_owned();

        info!(session_id = %session_id, browser = %config.browser_name, "webdriver session opened");

        Ok(Self {
            client,
            base_url,
            session_id,
            closed: AtomicBool::new(false),
        })
    }

    /// The driver-assigned session id.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, BrowserError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BrowserError::NoSession);
        }
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        read_value(request.send().await?).await
    }
}

impl Browser for WebDriverBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        debug!(url, "navigating");
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        let body = json!({ "using": "xpath", "value": locator.as_xpath() });
        match self.command(Method::POST, "/element", Some(body)).await {
            Ok(value) => element_from_value(&value).map(Some),
            Err(BrowserError::Protocol { error, .. }) if error == "no such element" => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, BrowserError> {
        let path = format!("/element/{}/displayed", element.0);
        let value = self.command(Method::GET, &path, None).await?;
        value
            .as_bool()
            .ok_or_else(|| BrowserError::UnexpectedResponse(format!("displayed returned {value}")))
    }

    async fn clear_cookies(&self) -> Result<(), BrowserError> {
        info!("clearing browser cookies");
        self.command(Method::DELETE, "/cookie", None).await?;
        Ok(())
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        let response = self.client.delete(url).send().await?;
        match read_value(response).await {
            Ok(_) => {
                info!(session_id = %self.session_id, "webdriver session closed");
                Ok(())
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "failed to close webdriver session");
                Err(e)
            }
        }
    }
}

/// Builds the `POST /session` body.
fn session_request(config: &BrowserConfig) -> Value {
    let mut always_match = json!({ "browserName": config.browser_name });
    if config.headless {
        match config.browser_name.as_str() {
            "chrome" | "chromium" => {
                always_match["goog:chromeOptions"] =
                    json!({ "args": ["--headless=new", "--no-sandbox", "--disable-gpu"] });
            }
            "firefox" => {
                always_match["moz:firefoxOptions"] = json!({ "args": ["-headless"] });
            }
            _ => {}
        }
    }
    json!({ "capabilities": { "alwaysMatch": always_match } })
}

/// Reads a WebDriver response and returns its `value` member.
async fn read_value(response: reqwest::Response) -> Result<Value, BrowserError> {
    let success = response.status().is_success();
    let body: Value = response.json().await?;
    decode_response(success, body)
}

/// Unwraps `{"value": ...}` or turns a W3C error body into [`BrowserError::Protocol`].
fn decode_response(success: bool, mut body: Value) -> Result<Value, BrowserError> {
    let value = body
        .get_mut("value")
        .map(Value::take)
        .ok_or_else(|| BrowserError::UnexpectedResponse(format!("missing value in {body}")))?;

    if success {
        return Ok(value);
    }
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    Err(BrowserError::Protocol {
        error: field("error"),
        message: field("message"),
    })
}

fn element_from_value(value: &Value) -> Result<ElementHandle, BrowserError> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(|id| ElementHandle(id.to_owned()))
        .ok_or_else(|| BrowserError::UnexpectedResponse(format!("not an element reference: {value}")))
}
