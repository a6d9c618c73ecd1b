//! In-memory driver for exercising page objects without a device.

use crate::core::DriverTrait;
use crate::errors::{PageError, Result};
use crate::pages::ScreenId;
use crate::types::Locator;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ScriptedElement {
    pub locator: Locator,
    pub text: Option<String>,
    pub displayed: bool,
    pub enabled: bool,
    pub appears_after: Duration,
    pub removed_after: Option<Duration>,
    pub navigates_to: Option<ScreenId>,
    value: String,
}

impl ScriptedElement {
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            text: None,
            displayed: true,
            enabled: true,
            appears_after: Duration::ZERO,
            removed_after: None,
            navigates_to: None,
            value: String::new(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Present only once the screen has been up for `delay`.
    pub fn appears_after(mut self, delay: Duration) -> Self {
        self.appears_after = delay;
        self
    }

    /// Gone once the screen has been up for `delay`.
    pub fn removed_after(mut self, delay: Duration) -> Self {
        self.removed_after = Some(delay);
        self
    }

    /// Clicking switches the app to `screen`.
    pub fn navigates_to(mut self, screen: ScreenId) -> Self {
        self.navigates_to = Some(screen);
        self
    }

    fn present_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.appears_after && self.removed_after.map_or(true, |gone| elapsed < gone)
    }
}

/// Handle returned from [`ScriptedDriver::find_elements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub screen: ScreenId,
    pub index: usize,
    pub locator: Locator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Click,
    SendKeys(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub screen: ScreenId,
    pub locator: Locator,
    pub kind: InteractionKind,
    pub at: DateTime<Utc>,
}

struct ScriptState {
    screens: HashMap<ScreenId, Vec<ScriptedElement>>,
    current: Option<ScreenId>,
    shown_at: Instant,
    interactions: Vec<Interaction>,
}

pub struct ScriptedDriver {
    session_id: String,
    state: Mutex<ScriptState>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(ScriptState {
                screens: HashMap::new(),
                current: None,
                shown_at: Instant::now(),
                interactions: Vec::new(),
            }),
        }
    }

    /// The wallet's onboarding and connection screens, starting on PIN
    /// setup. Without a `connect_delay` the connecting indicator never
    /// goes away.
    pub fn wallet(connect_delay: Option<Duration>) -> Self {
        let driver = Self::new();

        driver.add_screen(
            ScreenId::PinSetup,
            vec![
                ScriptedElement::new(Locator::accessibility_id("Enter Pin")),
                ScriptedElement::new(Locator::accessibility_id("Re-Enter Pin")),
                ScriptedElement::new(Locator::accessibility_id("Create"))
                    .navigates_to(ScreenId::Home),
            ],
        );

        let mut indicator =
            ScriptedElement::new(Locator::id("com.ariesbifold:id/CredentialOnTheWay"));
        if let Some(delay) = connect_delay {
            indicator = indicator.removed_after(delay);
        }
        driver.add_screen(
            ScreenId::Connecting,
            vec![
                ScriptedElement::new(Locator::class_name("android.widget.TextView"))
                    .with_text("Just a moment"),
                indicator,
                ScriptedElement::new(Locator::accessibility_id("Home"))
                    .navigates_to(ScreenId::Home),
            ],
        );

        driver.add_screen(
            ScreenId::Home,
            vec![ScriptedElement::new(Locator::accessibility_id("Scan"))],
        );

        driver.show(ScreenId::PinSetup);
        driver
    }

    fn state(&self) -> Result<MutexGuard<'_, ScriptState>> {
        self.state
            .lock()
            .map_err(PageError::from_driver_error)
    }

    pub fn add_screen(&self, screen: ScreenId, elements: Vec<ScriptedElement>) {
        if let Ok(mut state) = self.state() {
            state.screens.insert(screen, elements);
        }
    }

    /// Switches the app to `screen` and restarts its element timers.
    pub fn show(&self, screen: ScreenId) {
        if let Ok(mut state) = self.state() {
            state.current = Some(screen);
            state.shown_at = Instant::now();
        }
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        self.state().ok().and_then(|state| state.current)
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.state()
            .map(|state| state.interactions.clone())
            .unwrap_or_default()
    }

    pub fn clicks_on(&self, locator: &Locator) -> usize {
        self.interactions()
            .iter()
            .filter(|i| &i.locator == locator && i.kind == InteractionKind::Click)
            .count()
    }

    pub fn typed_into(&self, locator: &Locator) -> Vec<String> {
        self.interactions()
            .into_iter()
            .filter(|i| &i.locator == locator)
            .filter_map(|i| match i.kind {
                InteractionKind::SendKeys(text) => Some(text),
                InteractionKind::Click => None,
            })
            .collect()
    }

    /// Current contents of the first element matching `locator`, on any screen.
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        let state = self.state().ok()?;
        let value = state
            .screens
            .values()
            .flatten()
            .find(|e| &e.locator == locator)
            .map(|e| e.value.clone());
        value
    }

    fn with_element<T>(
        &self,
        element: &ElementRef,
        f: impl FnOnce(&mut ScriptState, ScriptedElement) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.state()?;
        let elapsed = state.shown_at.elapsed();
        if state.current != Some(element.screen) {
            return Err(PageError::StaleElement(format!(
                "{}: {} is no longer showing",
                element.locator, element.screen
            )));
        }
        let scripted = state
            .screens
            .get(&element.screen)
            .and_then(|elements| elements.get(element.index))
            .filter(|e| e.present_at(elapsed))
            .cloned()
            .ok_or_else(|| PageError::ElementNotFound(element.locator.to_string()))?;
        f(&mut state, scripted)
    }

    fn record(state: &mut ScriptState, element: &ElementRef, kind: InteractionKind) {
        state.interactions.push(Interaction {
            screen: element.screen,
            locator: element.locator.clone(),
            kind,
            at: Utc::now(),
        });
    }
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverTrait for ScriptedDriver {
    type Element = ElementRef;

    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let state = self.state()?;
        let Some(screen) = state.current else {
            return Ok(Vec::new());
        };
        let elapsed = state.shown_at.elapsed();

        let found = state
            .screens
            .get(&screen)
            .map(|elements| {
                elements
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| &e.locator == locator && e.present_at(elapsed))
                    .map(|(index, e)| ElementRef {
                        screen,
                        index,
                        locator: e.locator.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(found)
    }

    async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
        self.with_element(element, |_, scripted| Ok(scripted.displayed))
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        self.with_element(element, |_, scripted| Ok(scripted.enabled))
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        self.with_element(element, |state, scripted| {
            Self::record(state, element, InteractionKind::Click);
            if let Some(next) = scripted.navigates_to {
                state.current = Some(next);
                state.shown_at = Instant::now();
            }
            Ok(())
        })
    }

    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.with_element(element, |state, scripted| {
            if !scripted.enabled {
                return Err(PageError::Driver(format!(
                    "{} is not enabled",
                    element.locator
                )));
            }
            Self::record(state, element, InteractionKind::SendKeys(text.to_string()));
            if let Some(target) = state
                .screens
                .get_mut(&element.screen)
                .and_then(|elements| elements.get_mut(element.index))
            {
                target.value.push_str(text);
            }
            Ok(())
        })
    }

    async fn page_source(&self) -> Result<String> {
        let state = self.state()?;
        let Some(screen) = state.current else {
            return Ok("<hierarchy/>".to_string());
        };
        let elapsed = state.shown_at.elapsed();

        let mut source = format!("<hierarchy screen=\"{}\">", screen);
        for element in state
            .screens
            .get(&screen)
            .into_iter()
            .flatten()
            .filter(|e| e.present_at(elapsed))
        {
            source.push_str(&format!(
                "<element strategy=\"{}\" value=\"{}\" text=\"{}\"/>",
                element.locator.strategy.as_str(),
                element.locator.value(),
                element.text.as_deref().unwrap_or("")
            ));
        }
        source.push_str("</hierarchy>");
        Ok(source)
    }
}
