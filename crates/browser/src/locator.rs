//! Element locators.
//!
//! The scenario only ever locates elements by their text, so a locator is an
//! XPath expression built from one of three text predicates.

use std::fmt;

/// XPath element locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    xpath: String,
}

impl Locator {
    /// Uses a raw XPath expression.
    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
        }
    }

    /// Any element whose text contains `text`.
    pub fn containing_text(text: &str) -> Self {
        Self::xpath(format!("//*[contains(text(), {})]", xpath_literal(text)))
    }

    /// Any element whose text is exactly `text`.
    pub fn exact_text(text: &str) -> Self {
        Self::xpath(format!("//*[text()={}]", xpath_literal(text)))
    }

    /// A link whose text contains `text`.
    pub fn link_containing_text(text: &str) -> Self {
        Self::xpath(format!("//a[contains(text(), {})]", xpath_literal(text)))
    }

    /// The XPath expression.
    pub fn as_xpath(&self) -> &str {
        &self.xpath
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xpath)
    }
}

/// Quotes `text` as an XPath 1.0 string literal.
///
/// XPath 1.0 has no escape sequences, so text containing both quote kinds is
/// split into a `concat()` of literals.
fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    let parts: Vec<String> = text
        .split('"')
        .map(|part| format!("\"{part}\""))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}
