//! Allot Core - publishing and presenting shared charts
//!
//! Builds on the codec and resolver to provide:
//! - Share publishing: persisted links for owners, token links for everyone else
//! - A sliding-window rate limiter for persisted shares
//! - Share page metadata, chart summaries and weekly facts
//!
//! # Example
//!
//! ```rust,ignore
//! use allot_core::{ShareConfig, ShareRequest, ShareService};
//! use allot_model::{Activity, AllocationMode};
//! use allot_resolver::MemoryChartStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), allot_core::ShareError> {
//! let service = ShareService::new(ShareConfig::from_env(), Arc::new(MemoryChartStore::new()));
//! let request = ShareRequest::new(
//!     vec![Activity::new("1", "Sleep", 56.0, "#3498db")],
//!     AllocationMode::Hours,
//! );
//! let link = service.share(request).await?;
//! println!("{}", link.url);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod facts;
pub mod metadata;
pub mod ratelimit;
pub mod share;
pub mod summary;

pub use config::{RateLimitConfig, ShareConfig};
pub use error::ShareError;
pub use facts::{facts_for, generate_facts, Fact};
pub use metadata::ShareMetadata;
pub use ratelimit::{
    Clock, ManualClock, RateLimitDecision, RateLimitError, RateLimiter, SystemClock,
};
pub use share::{ShareKind, ShareLink, ShareRequest, ShareService};
pub use summary::{ChartSummary, Slice};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for publishing and presenting charts
    pub use crate::{
        facts_for, ChartSummary, ShareConfig, ShareError, ShareLink, ShareMetadata, ShareRequest,
        ShareService,
    };
    pub use allot_resolver::{ChartStore, MemoryChartStore, ResolveError, ShareResolver};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
