//! HTTP protocol implementation.
//!
//! A deliberately small slice of HTTP/1.1: one request line per connection,
//! answered by one response, after which the connection is closed.
//!
//! # Architecture
//!
//! - **`connection`**: drives a single connection through the states below
//! - **`parser`**: extracts the request line from the bytes read so far
//! - **`request`**: the parsed request and the method validator
//! - **`response`**: status codes and the response builder
//! - **`writer`**: serializes a response and writes it to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Request line received (empty or malformed → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate method, resolve target
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write half
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webroot::http::connection::Connection;
//! use webroot::resource::Resolver;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = Arc::new(Resolver::new("/srv/webroot").await?);
//!     let listener = TcpListener::bind("127.0.0.1:50000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let resolver = resolver.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, resolver, 8192);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
