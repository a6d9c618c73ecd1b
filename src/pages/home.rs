use super::{page_name, BasePage, Page, PageContext, ScreenId};
use crate::core::DriverTrait;
use crate::types::{Locator, PageMarker};

/// Wallet home screen, where onboarding and connection flows end up.
pub struct HomePage<'a, D: DriverTrait> {
    base: BasePage<'a, D>,
}

impl<'a, D: DriverTrait> HomePage<'a, D> {
    pub const ON_THIS_PAGE_LOCATOR: Locator = Locator::accessibility_id("Scan");

    pub async fn on_this_page(&self) -> bool {
        let timeout = self.base.config().default_presence_timeout();
        self.base
            .on_this_page(&PageMarker::Element(Self::ON_THIS_PAGE_LOCATOR), timeout)
            .await
    }
}

impl<'a, D: DriverTrait> Page<'a, D> for HomePage<'a, D> {
    const SCREEN: ScreenId = ScreenId::Home;

    fn new(ctx: PageContext<'a, D>) -> Self {
        Self {
            base: BasePage::new(ctx, page_name::<Self>()),
        }
    }

    fn base(&self) -> &BasePage<'a, D> {
        &self.base
    }
}
