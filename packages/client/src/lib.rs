//! SCB statistics client - Navigate and query Statistics Sweden's statistical
//! database.
//!
//! The database ("SSD") is a tree-shaped catalog of statistical tables. A GET
//! on a catalog path lists child nodes or, at a table, its selectable
//! dimensions ("variables"); a POST against a table path returns data for a
//! query built from chosen dimension values. This crate keeps both sides
//! human-readable: selections are written with display texts and value
//! labels, and responses can be translated back from raw codes to labels.
//!
//! # Example
//!
//! ```
//! use scb_client::{ScbClient, Selection};
//!
//! let mut client = ScbClient::new("en").unwrap();
//! client.move_down(["BE", "BE0101"]);
//! assert_eq!(
//!     client.current_path(),
//!     "https://api.scb.se/OV0104/v1/doris/en/ssd/BE/BE0101"
//! );
//!
//! let selection = Selection::new().with("region", ["Uppsala county"]);
//! assert_eq!(selection.len(), 1);
//! ```
//!
//! # Fetching data
//!
//! ```no_run
//! use scb_client::{FetchOptions, ScbClient, Selection};
//!
//! # async fn run() -> scb_client::Result<()> {
//! let mut client = ScbClient::with_path("en", ["BE", "BE0101", "BE0101A", "BefolkningNy"])?;
//!
//! let variables = client.variable_names().await?;
//! println!("selectable: {variables:?}");
//!
//! let selection = Selection::new()
//!     .with("region", ["Uppsala county"])
//!     .with("year", ["2022"]);
//! let data = client
//!     .fetch_data_for(
//!         &selection,
//!         FetchOptions {
//!             readable: true,
//!             ..FetchOptions::default()
//!         },
//!     )
//!     .await?;
//! for row in &data.data {
//!     println!("{:?} = {:?}", row.key, row.values);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The client is organized into several modules:
//!
//! - [`config`]: Endpoint constants, language validation, URL composition
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction and request helpers
//! - [`types`]: Catalog and data wire types
//! - [`query`]: Selection resolution and the wire query format
//! - [`client`]: The `ScbClient` itself

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

// Re-export the client and its options
pub use client::{FetchOptions, ScbClient};

// Re-export commonly used items
pub use error::{Result, ScbError};
pub use query::{DataQuery, ItemSelection, LabelMap, QueryEntry, ResponseSpec, Selection};
pub use types::{
    is_leaf_payload, CatalogEntry, CatalogNode, Column, DataRow, ResponseFormat, TableData,
    TableMeta, Variable,
};
