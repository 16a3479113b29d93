mod handler;
pub mod request;
pub mod response;
mod stages;
pub mod validator;

pub use handler::serve_request;
