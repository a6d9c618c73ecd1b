pub mod core;
pub mod errors;
pub mod pages;
pub mod testing;
pub mod types;

pub use crate::core::{Config, DriverTrait, ExecutionMode, LogSink, TracingSink};
pub use errors::{PageError, Result};
pub use pages::{
    BasePage, ConnectingPage, HomePage, Page, PageContext, PinSetupPage, Screen, ScreenId,
};
pub use types::*;
