pub mod driver;
pub mod js_executor;
pub mod locator;

pub use driver::Driver;
pub use js_executor::ChromiumDriver;
pub use locator::Locator;
