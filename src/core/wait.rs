//! Polling primitives behind every page-object wait.
//!
//! A check is called repeatedly until it yields a value or the timeout
//! runs out. Missing or stale elements count as "not yet"; any other
//! driver error ends the wait at once.

use crate::core::DriverTrait;
use crate::errors::{PageError, Result};
use crate::types::{Locator, WaitCondition};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

/// What a satisfied [`WaitCondition`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<E> {
    Element(E),
    /// The element is absent or hidden.
    Gone,
}

impl<E> WaitOutcome<E> {
    pub fn into_element(self) -> Option<E> {
        match self {
            WaitOutcome::Element(element) => Some(element),
            WaitOutcome::Gone => None,
        }
    }
}

pub async fn wait_until<T, F, Fut>(mut check: F, config: WaitConfig, description: &str) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();

    loop {
        match check().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) if e.is_transient() => {
                tracing::trace!("check for {} failed: {}", description, e);
            }
            Err(e) => return Err(e),
        }

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(PageError::Timeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval.min(config.timeout - elapsed)).await;
    }
}

/// Checks `condition` once against the current screen.
pub async fn evaluate<D: DriverTrait>(
    driver: &D,
    locator: &Locator,
    condition: WaitCondition,
) -> Result<Option<WaitOutcome<D::Element>>> {
    let elements = driver.find_elements(locator).await?;

    match condition {
        WaitCondition::PresenceOfElementLocated => {
            Ok(elements.into_iter().next().map(WaitOutcome::Element))
        }
        WaitCondition::VisibilityOfElementLocated => {
            for element in elements {
                if driver.is_displayed(&element).await? {
                    return Ok(Some(WaitOutcome::Element(element)));
                }
            }
            Ok(None)
        }
        WaitCondition::ElementToBeClickable => {
            for element in elements {
                if driver.is_displayed(&element).await? && driver.is_enabled(&element).await? {
                    return Ok(Some(WaitOutcome::Element(element)));
                }
            }
            Ok(None)
        }
        WaitCondition::InvisibilityOfElementLocated => {
            for element in &elements {
                match driver.is_displayed(element).await {
                    Ok(true) => return Ok(None),
                    Ok(false) => {}
                    // Went away between lookup and check
                    Err(e) if e.is_transient() => {}
                    Err(e) => return Err(e),
                }
            }
            Ok(Some(WaitOutcome::Gone))
        }
    }
}

pub async fn wait_for_condition<D: DriverTrait>(
    driver: &D,
    locator: &Locator,
    condition: WaitCondition,
    config: WaitConfig,
) -> Result<WaitOutcome<D::Element>> {
    let description = condition.describe(locator);
    wait_until(
        || async move { evaluate(driver, locator, condition).await },
        config,
        &description,
    )
    .await
}

pub async fn wait_for_text<D: DriverTrait>(driver: &D, text: &str, config: WaitConfig) -> Result<()> {
    let description = format!("text '{}'", text);
    wait_until(
        || async move {
            let source = driver.page_source().await?;
            Ok(source.contains(text).then_some(()))
        },
        config,
        &description,
    )
    .await
}
