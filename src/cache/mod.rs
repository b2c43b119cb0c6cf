//! 地址缓存模块：记录每个地址的解析结果（成功或失败），避免重复调用地理编码服务。
//!
//! # Address Cache Module
//!
//! Memoizes address → coordinate-or-absent outcomes for the lifetime of a
//! [`Geocoder`](crate::Geocoder). A failed address is stored as
//! [`CacheEntry::Unresolved`](crate::types::CacheEntry::Unresolved) so it is
//! never queried again, while an address that was never attempted has no
//! entry at all.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`GeocodeCache`] | Trait for cache backends, safe under concurrent callers |
//! | [`MemoryCache`] | In-memory backend, no eviction |
//! | [`CacheStats`] | Hit/miss/write counters |
//!
//! ## Example
//!
//! ```rust
//! use batch_geocoder::cache::{GeocodeCache, MemoryCache};
//! use batch_geocoder::types::{CacheEntry, Coordinate};
//!
//! let cache = MemoryCache::new();
//! cache.set("1 Main St", CacheEntry::Resolved(Coordinate::new(1.0, 2.0, "1 Main St")));
//! cache.set("nowhere", CacheEntry::Unresolved);
//!
//! assert_eq!(cache.len(), 2);
//! assert!(cache.get("never seen").is_none());
//! ```
//!
//! Entries are not evicted: dropping a recorded outcome would let the same
//! address reach the provider twice. Use [`GeocodeCache::clear`] to reset.

mod backend;
mod stats;

pub use backend::{GeocodeCache, MemoryCache};
pub use stats::CacheStats;
