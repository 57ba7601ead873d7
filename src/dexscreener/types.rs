use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_lenient_decimal;

#[derive(Debug, Deserialize)]
pub struct DexScreenerResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// A trading pair as listed by DexScreener.
///
/// Numeric fields that fail to parse are dropped to `None` so one junk pair
/// cannot sink a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub base_token: DexToken,
    pub quote_token: DexToken,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub price_usd: Option<Decimal>,
    #[serde(default)]
    pub liquidity: Option<DexLiquidity>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub fdv: Option<Decimal>,
}

impl DexPair {
    /// USD liquidity, zero when DexScreener omits it.
    pub fn liquidity_usd(&self) -> Decimal {
        self.liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexToken {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexLiquidity {
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub usd: Option<Decimal>,
}
