use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price paired with the liquidity backing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInfo<P, L> {
    pub price: P,
    pub liquidity: L,
}

impl<P, L> PriceInfo<P, L> {
    pub fn new(price: P, liquidity: L) -> Self {
        Self { price, liquidity }
    }
}

/// Summary of a single token as reported by a market-data provider.
///
/// Fields a provider does not expose are `None`; DexScreener, for instance,
/// never reports decimals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenOverview {
    pub price: Decimal,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub last_trade_unix_time: Option<i64>,
    pub liquidity: Decimal,
    pub supply: Option<Decimal>,
}

/// One OHLCV bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcvCandle {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub unix_time: i64,
    pub interval: String,
}
