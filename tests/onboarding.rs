use std::time::Duration;
use tokio::time::Instant;
use wallet_pages::core::{LogLevel, MemorySink};
use wallet_pages::testing::ScriptedDriver;
use wallet_pages::{
    Config, ConnectingPage, DriverTrait, Locator, PageContext, PageError, PinSetupPage, Screen,
    ScreenId,
};

type Pins<'a> = PinSetupPage<'a, ScriptedDriver>;
type Connecting<'a> = ConnectingPage<'a, ScriptedDriver>;

async fn set_up_pin(ctx: PageContext<'_, ScriptedDriver>, pin: &str) -> ScreenId {
    let pins: Pins = ctx.open();
    assert!(pins.on_this_page().await);
    assert!(pins.enter_pin(pin).await.unwrap());
    assert!(pins.enter_second_pin(pin).await.unwrap());
    pins.create_pin().await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn pin_setup_lands_on_home() {
    let driver = ScriptedDriver::wallet(None);
    let config = Config::default();
    let log = MemorySink::new();
    let ctx = PageContext::new(&driver, &config, &log);

    let next = set_up_pin(ctx, "369369").await;
    assert_eq!(next, ScreenId::Home);

    let landed = ctx.resolve(next);
    assert!(matches!(landed, Screen::Home(_)));
    assert!(landed.on_this_page().await);
    assert_eq!(driver.current_screen(), Some(ScreenId::Home));

    assert_eq!(
        driver.typed_into(&Locator::accessibility_id(Pins::FIRST_PIN)),
        vec!["369369".to_string()]
    );
    assert_eq!(
        driver.typed_into(&Locator::accessibility_id(Pins::SECOND_PIN)),
        vec!["369369".to_string()]
    );
    assert_eq!(
        driver.clicks_on(&Locator::accessibility_id(Pins::CREATE_PIN_BUTTON)),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn connection_finishes_before_timeout() {
    let driver = ScriptedDriver::wallet(Some(Duration::from_secs(4)));
    let config = Config::default();
    let log = MemorySink::new();
    let ctx = PageContext::new(&driver, &config, &log);

    set_up_pin(ctx, "1234").await;
    driver.show(ScreenId::Connecting);

    let connecting: Connecting = ctx.open();
    assert!(connecting.on_this_page().await);
    assert!(driver
        .page_source()
        .await
        .unwrap()
        .contains(Connecting::ON_THIS_PAGE_TEXT));

    let start = Instant::now();
    assert!(connecting
        .wait_for_connection_within(Duration::from_secs(30))
        .await
        .unwrap());
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(log.records_at(LogLevel::Error).is_empty());
}

#[tokio::test(start_paused = true)]
async fn stuck_connection_backs_out_to_home() {
    let driver = ScriptedDriver::wallet(None);
    let config = Config::default();
    let log = MemorySink::new();
    let ctx = PageContext::new(&driver, &config, &log);

    set_up_pin(ctx, "1234").await;
    driver.show(ScreenId::Connecting);
    let connecting: Connecting = ctx.open();

    let err = connecting
        .wait_for_connection_within(Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::Timeout { .. }));
    assert!(log.contains(LogLevel::Error, "Timing out at 5 seconds"));

    let next = connecting.select_go_back_to_home().await.unwrap();
    let home = ctx.resolve(next);
    assert_eq!(home.id(), ScreenId::Home);
    assert!(home.on_this_page().await);
    assert_eq!(driver.clicks_on(&Locator::accessibility_id(Connecting::BACK_TO_HOME)), 1);
}
