//! Navigate module
//!
//! Directory navigation on the server: querying and changing the working
//! directory.

mod operations;

// Re-export public functions
pub use operations::parse_pwd;
