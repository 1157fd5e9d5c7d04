pub mod cs;
pub mod error;

pub use cs::{dynamic, search};
pub use error::{Error, Result};
