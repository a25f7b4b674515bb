//! Remote storage management
//!
//! File and directory manipulation on the server, and metadata queries.

mod metadata;
mod operations;
