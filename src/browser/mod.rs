pub mod driver;
pub mod launch;
pub mod wait;

pub use driver::{DriverResult, Locator, PageDriver};
pub use launch::{launch_browser, BrowserKind};
pub use wait::Waiter;
