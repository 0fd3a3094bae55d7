//! # Migadu Client
//! Asynchronous wrapper around the Migadu admin REST API, providing typed methods to list, create, update, and delete the mailboxes and identities of a domain using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who provision or audit mail accounts on a Migadu-hosted domain: construct a [`Client`] for one domain, then work with [`Mailbox`] and [`Identity`] records. Both implement [`Addressable`] for code that only needs the resolved address.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application.
//!
//! ## Out of scope
//! No retries, caching, or validation of field combinations; the API is the source of truth. Credential storage and configuration loading are left to the application.
//!
//! ## Errors
//! Any response other than `200 OK` becomes [`Error::Status`] carrying the status code and raw body. Transport failures surface as [`Error::Http`], the client timeout as [`Error::Timeout`], and JSON problems as [`Error::Encode`] or [`Error::Decode`]. Public operations wrap these in [`Error::Operation`] naming the call; [`Error::status`] and friends look through the wrapper. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests and response statuses are emitted as `tracing` events at debug level; rejected requests at warn level. Credentials are never logged.
//!
//! ## Example
//! ```no_run
//! use migadu_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), migadu_client::Error> {
//!     let client = Client::new("admin@example.com", "api-key", None, "example.com", None)?;
//!     let mailbox = client
//!         .create_mailbox_with_invite("Alice", "alice", "alice@personal.example", false)
//!         .await?;
//!     println!("Created: {}", mailbox.address);
//!
//!     client.create_identity_no_auth("alice", "Sales", "sales").await?;
//!     for identity in client.list_identities("alice").await? {
//!         println!("Identity: {}", identity.address);
//!     }
//!
//!     client.delete_mailbox("alice").await?;
//!     Ok(())
//! }
//! ```

mod address;
mod client;
mod error;
mod identities;
mod mailboxes;
pub mod timestamp;

pub use address::Addressable;
pub use client::{Client, ClientBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::Error;
pub use identities::{Identity, PasswordUse};
pub use mailboxes::{Mailbox, PasswordMethod};
pub use reqwest::StatusCode;

/// Result type alias for Migadu operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
