use crate::errors::PageError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    AccessibilityId,
    Id,
    XPath,
    ClassName,
}

impl LocatorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorStrategy::AccessibilityId => "accessibility_id",
            LocatorStrategy::Id => "id",
            LocatorStrategy::XPath => "xpath",
            LocatorStrategy::ClassName => "class_name",
        }
    }
}

impl FromStr for LocatorStrategy {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accessibility_id" | "accessibility id" | "aid" => Ok(LocatorStrategy::AccessibilityId),
            "id" => Ok(LocatorStrategy::Id),
            "xpath" => Ok(LocatorStrategy::XPath),
            "class_name" | "class name" => Ok(LocatorStrategy::ClassName),
            other => Err(PageError::InvalidLocator(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// A strategy and value pair identifying one UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub strategy: LocatorStrategy,
    pub value: Cow<'static, str>,
}

impl Locator {
    pub const fn accessibility_id(value: &'static str) -> Self {
        Self {
            strategy: LocatorStrategy::AccessibilityId,
            value: Cow::Borrowed(value),
        }
    }

    pub const fn id(value: &'static str) -> Self {
        Self {
            strategy: LocatorStrategy::Id,
            value: Cow::Borrowed(value),
        }
    }

    pub const fn xpath(value: &'static str) -> Self {
        Self {
            strategy: LocatorStrategy::XPath,
            value: Cow::Borrowed(value),
        }
    }

    pub const fn class_name(value: &'static str) -> Self {
        Self {
            strategy: LocatorStrategy::ClassName,
            value: Cow::Borrowed(value),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses `"strategy=value"`, e.g. `id=com.ariesbifold:id/CredentialOnTheWay`.
    pub fn parse(input: &str) -> crate::errors::Result<Self> {
        let (strategy, value) = input
            .split_once('=')
            .ok_or_else(|| {
                PageError::InvalidLocator(format!("expected strategy=value, got '{}'", input))
            })?;
        let value = value.trim();
        if value.is_empty() {
            return Err(PageError::InvalidLocator(format!(
                "empty value in '{}'",
                input
            )));
        }
        Ok(Self {
            strategy: strategy.parse()?,
            value: Cow::Owned(value.to_string()),
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.value)
    }
}

/// Evidence that a screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMarker {
    Element(Locator),
    /// Text that must appear in the page source.
    Text(&'static str),
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Element(locator) => write!(f, "{}", locator),
            PageMarker::Text(text) => write!(f, "text '{}'", text),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitCondition {
    #[default]
    PresenceOfElementLocated,
    VisibilityOfElementLocated,
    ElementToBeClickable,
    InvisibilityOfElementLocated,
}

impl WaitCondition {
    pub fn describe(&self, locator: &Locator) -> String {
        match self {
            WaitCondition::PresenceOfElementLocated => format!("presence of {}", locator),
            WaitCondition::VisibilityOfElementLocated => format!("visibility of {}", locator),
            WaitCondition::ElementToBeClickable => format!("{} to be clickable", locator),
            WaitCondition::InvisibilityOfElementLocated => {
                format!("invisibility of {}", locator)
            }
        }
    }
}
