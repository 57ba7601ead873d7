//! DexScreener public API. No key is required.

mod client;
pub mod types;

pub use client::{DexScreenerClient, TOKENS_PER_REQUEST};
pub use types::{DexLiquidity, DexPair, DexScreenerResponse, DexToken};
