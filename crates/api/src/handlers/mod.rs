mod models;
mod state;
pub mod dispatch;

pub use models::{AppState, DispatchSettings, DispatchState, Dispatcher, ServedBody};
pub use dispatch::serve_request;
