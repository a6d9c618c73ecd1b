use crate::errors::Result;
use crate::types::Locator;
use async_trait::async_trait;

/// An automation session against the app under test.
///
/// Page objects only borrow the driver; starting and quitting the session
/// is the caller's job.
#[async_trait]
pub trait DriverTrait: Send + Sync {
    type Element: Clone + Send + Sync;

    /// Identifier of the underlying session
    fn session_id(&self) -> &str;

    /// All elements currently matching the locator, possibly none.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// Whether the element is rendered on screen
    async fn is_displayed(&self, element: &Self::Element) -> Result<bool>;

    /// Whether the element accepts input
    async fn is_enabled(&self, element: &Self::Element) -> Result<bool>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;

    /// Serialized view hierarchy of the current screen
    async fn page_source(&self) -> Result<String>;
}
