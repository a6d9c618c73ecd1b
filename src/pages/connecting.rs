use super::{page_name, BasePage, Page, PageContext, ScreenId};
use crate::core::DriverTrait;
use crate::errors::Result;
use crate::types::{Locator, PageMarker, WaitCondition};
use std::time::Duration;

/// "Just a moment" screen shown while the wallet connects to an agent.
pub struct ConnectingPage<'a, D: DriverTrait> {
    base: BasePage<'a, D>,
}

impl<'a, D: DriverTrait> ConnectingPage<'a, D> {
    /// Headline of the screen. Presence is checked with
    /// [`ON_THIS_PAGE_LOCATOR`](Self::ON_THIS_PAGE_LOCATOR), not this text.
    pub const ON_THIS_PAGE_TEXT: &'static str = "Just a moment";
    pub const ON_THIS_PAGE_LOCATOR: Locator = Locator::id("com.ariesbifold:id/CredentialOnTheWay");
    pub const BACK_TO_HOME: &'static str = "Home";

    /// Waits longer when the suite runs against a local device.
    pub async fn on_this_page(&self) -> bool {
        let timeout = self.base.config().presence_timeout();
        self.base
            .on_this_page(&PageMarker::Element(Self::ON_THIS_PAGE_LOCATOR), timeout)
            .await
    }

    pub async fn select_go_back_to_home(&self) -> Result<ScreenId> {
        let timeout = self.base.config().presence_timeout();
        self.base
            .require(&PageMarker::Element(Self::ON_THIS_PAGE_LOCATOR), timeout)
            .await?;

        let button = self.base.find_by_accessibility_id(Self::BACK_TO_HOME).await?;
        self.base.click(&button, "back to home").await?;
        self.base.log().info(self.base.name(), "Left the connecting screen for Home");
        Ok(ScreenId::Home)
    }

    /// Blocks until the connecting indicator goes away, up to the configured
    /// connection timeout.
    pub async fn wait_for_connection(&self) -> Result<bool> {
        self.wait_for_connection_within(self.base.config().connection_timeout())
            .await
    }

    /// Unlike the other actions, a timeout here is logged and handed back
    /// as is. Driver failures come back straight away, without the timeout
    /// log.
    pub async fn wait_for_connection_within(&self, timeout: Duration) -> Result<bool> {
        let log = self.base.log();
        let name = self.base.name();

        if let Err(e) = self
            .base
            .find_by(
                &Self::ON_THIS_PAGE_LOCATOR,
                timeout,
                WaitCondition::InvisibilityOfElementLocated,
            )
            .await
        {
            if e.is_timeout() {
                log.error(
                    name,
                    &format!(
                        "Connecting taking longer than expected. Timing out at {} seconds.",
                        timeout.as_secs()
                    ),
                );
            }
            return Err(e);
        }

        log.debug(name, "Connecting indicator disappeared");
        Ok(true)
    }
}

impl<'a, D: DriverTrait> Page<'a, D> for ConnectingPage<'a, D> {
    const SCREEN: ScreenId = ScreenId::Connecting;

    fn new(ctx: PageContext<'a, D>) -> Self {
        Self {
            base: BasePage::new(ctx, page_name::<Self>()),
        }
    }

    fn base(&self) -> &BasePage<'a, D> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, ExecutionMode, LogLevel, MemorySink};
    use crate::errors::PageError;
    use crate::testing::{ScriptedDriver, ScriptedElement};
    use async_trait::async_trait;
    use tokio::time::Instant;

    /// Session that died before the test started.
    struct TerminatedDriver;

    #[async_trait]
    impl DriverTrait for TerminatedDriver {
        type Element = ();

        fn session_id(&self) -> &str {
            "terminated"
        }

        async fn find_elements(&self, _locator: &Locator) -> Result<Vec<()>> {
            Err(PageError::from_driver_error("session terminated"))
        }

        async fn is_displayed(&self, _element: &()) -> Result<bool> {
            Err(PageError::from_driver_error("session terminated"))
        }

        async fn is_enabled(&self, _element: &()) -> Result<bool> {
            Err(PageError::from_driver_error("session terminated"))
        }

        async fn click(&self, _element: &()) -> Result<()> {
            Err(PageError::from_driver_error("session terminated"))
        }

        async fn send_keys(&self, _element: &(), _text: &str) -> Result<()> {
            Err(PageError::from_driver_error("session terminated"))
        }

        async fn page_source(&self) -> Result<String> {
            Err(PageError::from_driver_error("session terminated"))
        }
    }

    type Connecting<'a> = ConnectingPage<'a, ScriptedDriver>;

    fn connecting_screen(driver: &ScriptedDriver, indicator: ScriptedElement) {
        driver.add_screen(
            ScreenId::Connecting,
            vec![
                indicator,
                ScriptedElement::new(Locator::accessibility_id(Connecting::BACK_TO_HOME))
                    .navigates_to(ScreenId::Home),
            ],
        );
        driver.add_screen(
            ScreenId::Home,
            vec![ScriptedElement::new(Locator::accessibility_id("Scan"))],
        );
    }

    #[tokio::test(start_paused = true)]
    async fn presence_timeout_follows_execution_mode() {
        let driver = ScriptedDriver::new();
        connecting_screen(&driver, ScriptedElement::new(Connecting::ON_THIS_PAGE_LOCATOR));
        driver.show(ScreenId::Home);
        let log = MemorySink::new();

        for (mode, secs) in [(ExecutionMode::Local, 50), (ExecutionMode::Remote, 10)] {
            let config = Config::with_mode(mode);
            let page: Connecting = PageContext::new(&driver, &config, &log).open();
            let start = Instant::now();
            assert!(!page.on_this_page().await);
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_secs(secs));
            assert!(elapsed < Duration::from_secs(secs + 1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn go_back_to_home_clicks_once() {
        let driver = ScriptedDriver::new();
        connecting_screen(&driver, ScriptedElement::new(Connecting::ON_THIS_PAGE_LOCATOR));
        driver.show(ScreenId::Connecting);
        let config = Config::default();
        let log = MemorySink::new();
        let page: Connecting = PageContext::new(&driver, &config, &log).open();

        let next = page.select_go_back_to_home().await.unwrap();
        assert_eq!(next, ScreenId::Home);
        assert!(log.contains(LogLevel::Info, "Left the connecting screen"));
        assert_eq!(driver.clicks_on(&Locator::accessibility_id("Home")), 1);
        assert_eq!(driver.current_screen(), Some(ScreenId::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn go_back_to_home_off_screen_clicks_nothing() {
        let driver = ScriptedDriver::new();
        connecting_screen(&driver, ScriptedElement::new(Connecting::ON_THIS_PAGE_LOCATOR));
        driver.show(ScreenId::Home);
        let config = Config::default();
        let log = MemorySink::new();
        let page: Connecting = PageContext::new(&driver, &config, &log).open();

        let err = page.select_go_back_to_home().await.unwrap_err();
        assert!(matches!(err, PageError::NotOnPage { ref page } if page == "ConnectingPage"));
        assert!(driver.interactions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn connection_completes_when_indicator_disappears() {
        let driver = ScriptedDriver::new();
        connecting_screen(
            &driver,
            ScriptedElement::new(Connecting::ON_THIS_PAGE_LOCATOR)
                .removed_after(Duration::from_secs(3)),
        );
        driver.show(ScreenId::Connecting);
        let config = Config::default();
        let log = MemorySink::new();
        let page: Connecting = PageContext::new(&driver, &config, &log).open();

        assert!(page.wait_for_connection().await.unwrap());
        assert!(log.contains(LogLevel::Debug, "Connecting indicator disappeared"));
        assert!(log.records_at(LogLevel::Error).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_connection_logs_and_returns_timeout() {
        let driver = ScriptedDriver::new();
        connecting_screen(&driver, ScriptedElement::new(Connecting::ON_THIS_PAGE_LOCATOR));
        driver.show(ScreenId::Connecting);
        let config = Config::default();
        let log = MemorySink::new();
        let page: Connecting = PageContext::new(&driver, &config, &log).open();

        let start = Instant::now();
        let err = page
            .wait_for_connection_within(Duration::from_secs(5))
            .await
            .unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, PageError::Timeout { timeout, .. } if timeout == Duration::from_secs(5)));
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6));
        assert!(log.contains(LogLevel::Error, "5 seconds"));
    }

    #[tokio::test(start_paused = true)]
    async fn dead_session_fails_connection_wait_at_once() {
        let driver = TerminatedDriver;
        let config = Config::default();
        let log = MemorySink::new();
        let page: ConnectingPage<'_, TerminatedDriver> =
            PageContext::new(&driver, &config, &log).open();

        let start = Instant::now();
        let err = page.wait_for_connection().await.unwrap_err();

        assert!(matches!(err, PageError::Driver(ref msg) if msg == "session terminated"));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(log.records_at(LogLevel::Error).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dead_session_reads_as_not_on_page() {
        let driver = TerminatedDriver;
        let config = Config::default();
        let log = MemorySink::new();
        let page: ConnectingPage<'_, TerminatedDriver> =
            PageContext::new(&driver, &config, &log).open();

        assert!(!page.on_this_page().await);
        assert!(log.contains(LogLevel::Warn, "session terminated"));
        assert!(matches!(
            page.select_go_back_to_home().await,
            Err(PageError::NotOnPage { .. })
        ));
    }
}
