//! Webroot - minimal HTTP/1.1 file server
//!
//! Serves files and directory listings from a fixed root directory,
//! one request per connection.

pub mod config;
pub mod resource;
pub mod http;
pub mod server;
