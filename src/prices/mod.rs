mod cache;
mod source;

pub use cache::PriceCache;
pub use source::{CachedPriceSource, PriceSource};

#[cfg(test)]
pub use source::MockPriceSource;
