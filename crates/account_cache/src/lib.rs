//! Cached, deduplicated account fetching.
//!
//! Generic "fetch a typed view of an on-chain account" utility for dashboard
//! reads that hit the same handful of accounts over and over. At most one
//! backend load runs per address at a time; concurrent callers share the same
//! in-flight future, completed loads are cached, and accounts marked static
//! are fetched once for the life of the cache.

mod cache;
mod errors;
mod rpc;
mod source;

pub use cache::{AccountFetchCache, CacheConfig, Parsed};
pub use errors::{FetchError, SourceError};
pub use rpc::RpcAccountSource;
pub use source::{AccountSource, RawAccount};
