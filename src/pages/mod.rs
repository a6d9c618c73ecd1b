pub mod base;
pub mod connecting;
pub mod home;
pub mod pin_setup;

pub use base::BasePage;
pub use connecting::ConnectingPage;
pub use home::HomePage;
pub use pin_setup::PinSetupPage;

use crate::core::{Config, DriverTrait, LogSink};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an app screen. Actions that navigate return one of these
/// and the caller turns it into a page object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    Connecting,
    PinSetup,
    Home,
}

impl ScreenId {
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Connecting => "Connecting",
            ScreenId::PinSetup => "PIN Setup",
            ScreenId::Home => "Home",
        }
    }

    pub fn all() -> [ScreenId; 3] {
        [ScreenId::Connecting, ScreenId::PinSetup, ScreenId::Home]
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Everything a page object borrows for the length of a test.
pub struct PageContext<'a, D: DriverTrait> {
    pub driver: &'a D,
    pub config: &'a Config,
    pub log: &'a dyn LogSink,
}

impl<'a, D: DriverTrait> Clone for PageContext<'a, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: DriverTrait> Copy for PageContext<'a, D> {}

impl<'a, D: DriverTrait> PageContext<'a, D> {
    pub fn new(driver: &'a D, config: &'a Config, log: &'a dyn LogSink) -> Self {
        Self {
            driver,
            config,
            log,
        }
    }

    pub fn open<P: Page<'a, D>>(&self) -> P {
        P::new(*self)
    }

    pub fn resolve(&self, screen: ScreenId) -> Screen<'a, D> {
        match screen {
            ScreenId::Connecting => Screen::Connecting(self.open()),
            ScreenId::PinSetup => Screen::PinSetup(self.open()),
            ScreenId::Home => Screen::Home(self.open()),
        }
    }
}

pub trait Page<'a, D: DriverTrait + 'a>: Sized {
    const SCREEN: ScreenId;

    fn new(ctx: PageContext<'a, D>) -> Self;

    fn base(&self) -> &BasePage<'a, D>;

    fn name(&self) -> &'static str {
        self.base().name()
    }

    fn screen(&self) -> ScreenId {
        Self::SCREEN
    }
}

/// A page object for whichever screen an action led to.
pub enum Screen<'a, D: DriverTrait> {
    Connecting(ConnectingPage<'a, D>),
    PinSetup(PinSetupPage<'a, D>),
    Home(HomePage<'a, D>),
}

impl<'a, D: DriverTrait> Screen<'a, D> {
    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Connecting(_) => ScreenId::Connecting,
            Screen::PinSetup(_) => ScreenId::PinSetup,
            Screen::Home(_) => ScreenId::Home,
        }
    }

    pub async fn on_this_page(&self) -> bool {
        match self {
            Screen::Connecting(page) => page.on_this_page().await,
            Screen::PinSetup(page) => page.on_this_page().await,
            Screen::Home(page) => page.on_this_page().await,
        }
    }
}

/// Type name without module path or generic arguments.
pub(crate) fn page_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let bare = full.split('<').next().unwrap_or(full);
    bare.rsplit("::").next().unwrap_or(bare)
}
