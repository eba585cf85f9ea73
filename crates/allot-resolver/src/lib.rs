//! Allot Share Resolver
//!
//! One entry point that turns an opaque share path segment into a chart.
//!
//! # Dispatch
//!
//! ```text
//! segment ─ Segment::classify ─┬─ Reference(n) → ChartStore::lookup(n) ─┐
//!                              └─ Token(t)     → ShareCodec::decode(t) ─┴→ ResolvedChart | ResolveError
//! ```
//!
//! A segment made only of ASCII digits is a [`ShareReference`]; anything else
//! is treated as a share token. Callers (share page, preview image, record
//! fetch) never need to know which branch ran.
//!
//! # Example
//!
//! ```rust,ignore
//! use allot_resolver::{MemoryChartStore, ShareResolver};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), allot_resolver::ResolveError> {
//! let resolver = ShareResolver::new(Arc::new(MemoryChartStore::new()));
//! let chart = resolver.resolve("42").await?;
//! println!("{} activities in {} mode", chart.activities.len(), chart.mode);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod resolver;
pub mod segment;
pub mod store;

pub use error::ResolveError;
pub use resolver::{ResolvedChart, ShareResolver, SourceKind};
pub use segment::Segment;
pub use store::{ChartStore, MemoryChartStore, StoreError, StoredChart};

pub use allot_model::ShareReference;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
