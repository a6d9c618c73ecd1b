use super::PageContext;
use crate::core::wait::{self, WaitConfig, WaitOutcome};
use crate::core::{Config, DriverTrait, LogSink};
use crate::errors::{PageError, Result};
use crate::types::{Locator, PageMarker, WaitCondition};
use std::time::Duration;

/// Lookup and wait helpers shared by every page object.
pub struct BasePage<'a, D: DriverTrait> {
    ctx: PageContext<'a, D>,
    name: &'static str,
}

impl<'a, D: DriverTrait> BasePage<'a, D> {
    pub fn new(ctx: PageContext<'a, D>, name: &'static str) -> Self {
        Self { ctx, name }
    }

    pub fn driver(&self) -> &'a D {
        self.ctx.driver
    }

    pub fn config(&self) -> &'a Config {
        self.ctx.config
    }

    pub fn log(&self) -> &'a dyn LogSink {
        self.ctx.log
    }

    pub fn context(&self) -> PageContext<'a, D> {
        self.ctx
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn wait_config(&self, timeout: Duration) -> WaitConfig {
        WaitConfig::new(timeout, self.config().poll_interval())
    }

    /// Polls for `marker` until it shows up or `timeout` passes. Running
    /// out of time is an answer here, not an error.
    pub async fn on_this_page(&self, marker: &PageMarker, timeout: Duration) -> bool {
        let wait = self.wait_config(timeout);
        let found = match marker {
            PageMarker::Element(locator) => wait::wait_for_condition(
                self.driver(),
                locator,
                WaitCondition::PresenceOfElementLocated,
                wait,
            )
            .await
            .map(|_| ()),
            PageMarker::Text(text) => wait::wait_for_text(self.driver(), text, wait).await,
        };

        match found {
            Ok(()) => true,
            Err(e) if e.is_timeout() => {
                self.log()
                    .debug(self.name, &format!("{} not found: {}", marker, e));
                false
            }
            Err(e) => {
                self.log()
                    .warn(self.name, &format!("Checking for {} failed: {}", marker, e));
                false
            }
        }
    }

    /// Fails with [`PageError::NotOnPage`] unless `marker` shows up in time.
    pub async fn require(&self, marker: &PageMarker, timeout: Duration) -> Result<()> {
        if self.on_this_page(marker, timeout).await {
            Ok(())
        } else {
            Err(PageError::not_on_page(self.name))
        }
    }

    /// Waits for `condition` on `locator`. A timeout is returned as
    /// [`PageError::Timeout`] untouched.
    pub async fn find_by(
        &self,
        locator: &Locator,
        timeout: Duration,
        condition: WaitCondition,
    ) -> Result<WaitOutcome<D::Element>> {
        wait::wait_for_condition(self.driver(), locator, condition, self.wait_config(timeout)).await
    }

    /// Like [`find_by`](Self::find_by), for conditions that yield an element.
    pub async fn find_element(
        &self,
        locator: &Locator,
        timeout: Duration,
        condition: WaitCondition,
    ) -> Result<D::Element> {
        self.find_by(locator, timeout, condition)
            .await?
            .into_element()
            .ok_or_else(|| PageError::ElementNotFound(locator.to_string()))
    }

    pub async fn find_by_accessibility_id(&self, id: &'static str) -> Result<D::Element> {
        let locator = Locator::accessibility_id(id);
        let timeout = self.config().default_presence_timeout();
        match self
            .find_element(&locator, timeout, WaitCondition::PresenceOfElementLocated)
            .await
        {
            Err(PageError::Timeout { .. }) => Err(PageError::ElementNotFound(format!(
                "{} on {} after {} seconds",
                locator,
                self.name,
                timeout.as_secs()
            ))),
            other => other,
        }
    }

    pub async fn click(&self, element: &D::Element, what: &str) -> Result<()> {
        self.log().debug(self.name, &format!("Clicking {}", what));
        self.driver().click(element).await
    }

    pub async fn type_text(&self, element: &D::Element, what: &str, text: &str) -> Result<()> {
        self.log().debug(self.name, &format!("Typing into {}", what));
        self.driver().send_keys(element, text).await
    }
}
