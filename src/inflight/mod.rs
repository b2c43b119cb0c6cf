//! 在途请求去重模块：同一地址的并发解析只会触发一次外部调用。
//!
//! # In-Flight Deduplication Module
//!
//! [`Resolver::resolve`] routes every address through three checks:
//!
//! 1. a recorded outcome in the [`GeocodeCache`](crate::cache::GeocodeCache)
//!    is returned without network access;
//! 2. a pending lookup for the same address is awaited through its shared
//!    handle;
//! 3. otherwise a new lookup task is spawned and registered.
//!
//! The spawned task owns a completion guard that writes the outcome to the
//! cache and then removes the registry entry on every exit path, including
//! provider panics. Because the cache write precedes the removal, a caller
//! that finds no pending entry is guaranteed to find the cached outcome.
//!
//! Lookups run on the tokio runtime, so a waiter that stops polling does not
//! halt the lookup; other waiters and the cache still receive the outcome.

mod registry;
mod resolver;

pub use registry::InFlightRegistry;
pub use resolver::{Resolver, ResolverStats};
