pub mod api;
pub mod controller;
pub mod scanner;

pub use api::FinnrickWidget;
pub use controller::{WidgetState, init_widget};
pub use scanner::PageScanner;
