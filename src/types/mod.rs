//! 类型模块：地址、坐标与缓存条目等核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared by the cache, the in-flight registry, the provider
//! adapter and the batch scheduler.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Coordinate`] | A resolved position plus the provider's formatted address |
//! | [`CacheEntry`] | Recorded outcome for an address (resolved or unresolved) |
//! | [`ResultMapping`] | Address → coordinate map holding only successful resolutions |

mod coordinate;

pub use coordinate::{CacheEntry, Coordinate, ResultMapping};
