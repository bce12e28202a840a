// Response cache module
// Author: kelexine (https://github.com/kelexine)

pub mod key;
pub mod memory;
pub mod models;
pub mod store;

pub use key::CacheKey;
pub use memory::MemoryCache;
pub use models::CacheStats;
pub use store::{CachedResponse, NoopCache, ResponseCache};
