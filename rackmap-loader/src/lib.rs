//! Async loading of warehouse location exports.
//!
//! Raw text is read from a file or fetched over HTTP, then handed to
//! `rackmap-core` for extraction, grouping and layout.
//!
//! # Example
//!
//! ```ignore
//! use rackmap_loader::{Loader, SourceRef};
//!
//! #[tokio::main]
//! async fn main() {
//!     let loader = Loader::default();
//!     let source: SourceRef = "https://example.com/Location.txt".parse().unwrap();
//!
//!     // Falls back to the sample dataset if the export is unavailable.
//!     let positions = loader.load_or_sample(&source).await;
//!     println!("{} positions", positions.len());
//! }
//! ```

mod error;
mod loader;
mod source;

pub use error::LoadError;
pub use loader::Loader;
pub use source::SourceRef;
