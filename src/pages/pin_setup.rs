use super::{page_name, BasePage, Page, PageContext, ScreenId};
use crate::core::DriverTrait;
use crate::errors::Result;
use crate::types::PageMarker;

pub struct PinSetupPage<'a, D: DriverTrait> {
    base: BasePage<'a, D>,
}

impl<'a, D: DriverTrait> PinSetupPage<'a, D> {
    pub const ON_THIS_PAGE_TEXT: &'static str = "Enter Pin";
    pub const FIRST_PIN: &'static str = "Enter Pin";
    pub const SECOND_PIN: &'static str = "Re-Enter Pin";
    pub const CREATE_PIN_BUTTON: &'static str = "Create";

    const MARKER: PageMarker = PageMarker::Text(Self::ON_THIS_PAGE_TEXT);

    pub async fn on_this_page(&self) -> bool {
        let timeout = self.base.config().default_presence_timeout();
        self.base.on_this_page(&Self::MARKER, timeout).await
    }

    async fn require(&self) -> Result<()> {
        let timeout = self.base.config().default_presence_timeout();
        self.base.require(&Self::MARKER, timeout).await
    }

    pub async fn enter_pin(&self, pin: &str) -> Result<bool> {
        self.require().await?;
        let field = self.base.find_by_accessibility_id(Self::FIRST_PIN).await?;
        self.base.type_text(&field, "first PIN field", pin).await?;
        Ok(true)
    }

    pub async fn enter_second_pin(&self, pin: &str) -> Result<bool> {
        self.require().await?;
        let field = self.base.find_by_accessibility_id(Self::SECOND_PIN).await?;
        self.base.type_text(&field, "second PIN field", pin).await?;
        Ok(true)
    }

    pub async fn create_pin(&self) -> Result<ScreenId> {
        self.require().await?;
        let button = self
            .base
            .find_by_accessibility_id(Self::CREATE_PIN_BUTTON)
            .await?;
        self.base.click(&button, "create PIN").await?;
        Ok(ScreenId::Home)
    }
}

impl<'a, D: DriverTrait> Page<'a, D> for PinSetupPage<'a, D> {
    const SCREEN: ScreenId = ScreenId::PinSetup;

    fn new(ctx: PageContext<'a, D>) -> Self {
        Self {
            base: BasePage::new(ctx, page_name::<Self>()),
        }
    }

    fn base(&self) -> &BasePage<'a, D> {
        &self.base
    }
}
