mod client;
pub mod types;

pub use client::{BirdEyeClient, MULTI_PRICE_BATCH_SIZE};
pub use types::{
    BirdeyeOhlcvItem, BirdeyeOhlcvItems, BirdeyeResponse, MultiPriceData, MultiPriceItem,
    TokenOverviewData,
};
