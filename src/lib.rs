//! # sanity-query
//!
//! Async Rust client for the [Sanity](https://www.sanity.io) content query
//! API. Send a GROQ query (with optional parameters) to a project's dataset
//! through the API CDN and get back the result -- or a typed error.
//!
//! ## Quick start
//!
//! ```no_run
//! use sanity_query::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> sanity_query::Result<()> {
//!     let client = Client::new("abc123")?;
//!
//!     let params = json!({ "type": "post" });
//!     let result = client
//!         .execute_query("*[_type == $type]{title}", Some(&params))
//!         .await?;
//!
//!     if let Some(ms) = result.elapsed_ms {
//!         println!("Took {ms}ms");
//!     }
//!     println!("{:#?}", result.result);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use sanity_query::ClientBuilder;
//!
//! # fn example() -> sanity_query::Result<()> {
//! let client = ClientBuilder::new()
//!     .project_id("abc123")
//!     .dataset("staging")
//!     .api_version("v2023-05-03")
//!     .build()?;
//!
//! assert_eq!(
//!     client.cdn_base_url(),
//!     "https://abc123.apicdn.sanity.io/v2023-05-03/data/query/staging"
//! );
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod errors;
mod models;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use errors::{Result, SanityError};
pub use models::QueryResult;
