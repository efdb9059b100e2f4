pub mod app;
pub mod context;
pub mod dispatcher;
pub mod screen;
pub mod ui;
pub mod utils;
pub mod views;

pub use app::App;
pub use context::AppContext;
pub use dispatcher::{QueryDispatcher, RequestId};
pub use screen::{Nav, Screen};
