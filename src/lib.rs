//! Solana token market data from Birdeye and DexScreener.

pub mod birdeye;
pub mod config;
pub mod dexscreener;
pub mod error;
pub mod http;
pub mod prices;
pub mod types;
pub mod utils;

pub use birdeye::BirdEyeClient;
pub use config::Config;
pub use dexscreener::{DexPair, DexScreenerClient};
pub use error::{ClientError, ClientErrorKind, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use prices::{CachedPriceSource, PriceCache, PriceSource};
pub use types::{OhlcvCandle, PriceInfo, TokenOverview};
pub use utils::{is_solana_address, SOL_MINT};
