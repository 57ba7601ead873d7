use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::OhlcvCandle;
use crate::utils::deserialize_lenient_decimal;

/// Envelope every Birdeye endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct BirdeyeResponse<T> {
    pub data: Option<T>,
}

pub type MultiPriceData = HashMap<String, Option<MultiPriceItem>>;

/// Unparseable numbers read as `None`, which surfaces as a missing price or
/// liquidity for that token only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MultiPriceItem {
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub value: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub liquidity: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenOverviewData {
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub price: Option<Decimal>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub last_trade_unix_time: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub liquidity: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub supply: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct BirdeyeOhlcvItems {
    #[serde(default)]
    pub items: Vec<BirdeyeOhlcvItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdeyeOhlcvItem {
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
    #[serde(rename = "type")]
    pub interval: String,
}

impl From<BirdeyeOhlcvItem> for OhlcvCandle {
    fn from(item: BirdeyeOhlcvItem) -> Self {
        Self {
            open: item.open,
            high: item.high,
            low: item.low,
            close: item.close,
            volume: item.volume,
            unix_time: item.unix_time,
            interval: item.interval,
        }
    }
}
