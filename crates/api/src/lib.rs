pub mod handlers;
pub mod errors;

pub use handlers::*;
pub use errors::RequestPathError;
