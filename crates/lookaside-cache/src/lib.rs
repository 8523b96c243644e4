//! Lookaside (cache-aside) helper
//!
//! Reads a key from a [`CacheStore`], falls back to a caller-supplied fetch
//! on a miss and writes the fetched value back. Store failures on the
//! lookaside path are logged and treated as misses; they never reach the
//! caller.

mod error;
mod lookaside;
mod memory;
mod redis_store;
mod store;

pub use error::{CacheError, Result};
pub use lookaside::Lookaside;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::CacheStore;
