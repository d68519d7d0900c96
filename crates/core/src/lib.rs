//! Date and result-set types shared by the pantry OCR crates.

pub mod date;
pub mod result_set;
pub mod window;

pub use date::{CanonicalDate, DateError};
pub use result_set::ResultSet;
pub use window::ExpiryWindow;
