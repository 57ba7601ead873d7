use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::dexscreener::types::{DexPair, DexScreenerResponse};
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{PriceInfo, TokenOverview};
use crate::utils::{is_solana_address, SOLANA_CHAIN_ID, SOL_MINT};

/// DexScreener accepts at most 30 comma separated addresses per call.
pub const TOKENS_PER_REQUEST: usize = 30;

pub struct DexScreenerClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl DexScreenerClient<ReqwestTransport> {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Ok(Self::new(
            ReqwestTransport::from_config(config)?,
            config.dexscreener_url.clone(),
        ))
    }
}

impl<T: HttpTransport> DexScreenerClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn validate_token_address(token_address: &str) -> Result<(), ClientError> {
        if token_address.is_empty() {
            return Err(ClientError::NoPositions);
        }
        if !is_solana_address(token_address) {
            return Err(ClientError::InvalidSolanaAddress(token_address.to_string()));
        }
        Ok(())
    }

    pub fn validate_token_addresses(token_addresses: &[String]) -> Result<(), ClientError> {
        if token_addresses.is_empty() {
            return Err(ClientError::NoPositions);
        }
        token_addresses
            .iter()
            .try_for_each(|address| Self::validate_token_address(address))
    }

    pub fn validate_response(resp: &HttpResponse) -> Result<(), ClientError> {
        if !resp.is_ok() {
            return Err(ClientError::InvalidTokens {
                status: resp.status,
            });
        }
        Ok(())
    }

    async fn get_pairs(&self, joined_addresses: &str) -> Result<Vec<DexPair>, ClientError> {
        let url = format!("{}/tokens/{}", self.base_url, joined_addresses);
        debug!("DexScreener GET {}", url);

        let resp = self.transport.send(HttpRequest::get(url)).await?;
        Self::validate_response(&resp)?;

        let body: DexScreenerResponse = resp.json()?;
        Ok(body
            .pairs
            .unwrap_or_default()
            .into_iter()
            .filter(|pair| pair.chain_id.eq_ignore_ascii_case(SOLANA_CHAIN_ID))
            .collect())
    }

    /// Pairs for a single token.
    pub async fn call_api(&self, token_address: &str) -> Result<Vec<DexPair>, ClientError> {
        Self::validate_token_address(token_address)?;
        self.get_pairs(token_address).await
    }

    /// Pairs for many tokens, fetched in concurrent batches and de-duplicated
    /// by pair address.
    pub async fn call_api_bulk(
        &self,
        token_addresses: &[String],
    ) -> Result<Vec<DexPair>, ClientError> {
        Self::validate_token_addresses(token_addresses)?;

        let batches: Vec<String> = token_addresses
            .chunks(TOKENS_PER_REQUEST)
            .map(|batch| batch.join(","))
            .collect();
        let responses = try_join_all(batches.iter().map(|joined| self.get_pairs(joined))).await?;

        let mut seen = HashSet::new();
        Ok(responses
            .into_iter()
            .flatten()
            .filter(|pair| seen.insert(pair.pair_address.clone()))
            .collect())
    }

    pub async fn fetch_prices_dex(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        let pairs = self.call_api_bulk(token_addresses).await?;

        let prices = token_addresses
            .iter()
            .map(|address| {
                let pair = Self::best_pair_for(&pairs, address)
                    .ok_or_else(|| ClientError::MissingPrice(address.clone()))?;
                let price = pair
                    .price_usd
                    .ok_or_else(|| ClientError::MissingPrice(address.clone()))?;
                Ok((address.clone(), PriceInfo::new(price, pair.liquidity_usd())))
            })
            .collect::<Result<HashMap<_, _>, ClientError>>()?;

        info!("Fetched DexScreener prices for {} tokens", prices.len());
        Ok(prices)
    }

    /// Overview built from the token's most liquid pair. DexScreener does not
    /// report decimals or last trade time; supply is derived from FDV.
    pub async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        let pairs = self.call_api(address).await?;
        let pair = Self::best_pair_for(&pairs, address)
            .ok_or_else(|| ClientError::MissingPrice(address.to_string()))?;

        let price = pair
            .price_usd
            .ok_or_else(|| ClientError::MissingPrice(address.to_string()))?;
        let liquidity = pair
            .liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .ok_or_else(|| ClientError::NoLiquidity(address.to_string()))?;
        let supply = match pair.fdv {
            Some(fdv) if !price.is_zero() => fdv.checked_div(price),
            _ => None,
        };

        Ok(TokenOverview {
            price,
            symbol: pair.base_token.symbol.clone().unwrap_or_default(),
            decimals: None,
            last_trade_unix_time: None,
            liquidity,
            supply,
        })
    }

    pub async fn fetch_largest_pool_with_sol(
        &self,
        address: &str,
    ) -> Result<Option<DexPair>, ClientError> {
        let pairs = self.call_api(address).await?;
        let largest = Self::find_largest_pool_with_sol(&pairs, address).cloned();
        if largest.is_none() {
            warn!("No SOL quoted pool found for {}", address);
        }
        Ok(largest)
    }

    /// Pair with base token `address`, quoted in SOL, holding the most USD
    /// liquidity. Earlier pairs win ties.
    pub fn find_largest_pool_with_sol<'a>(
        token_pairs: &'a [DexPair],
        address: &str,
    ) -> Option<&'a DexPair> {
        Self::largest_by_liquidity(token_pairs.iter().filter(|pair| {
            pair.base_token.address == address && pair.quote_token.address == SOL_MINT
        }))
    }

    fn best_pair_for<'a>(pairs: &'a [DexPair], address: &str) -> Option<&'a DexPair> {
        Self::largest_by_liquidity(
            pairs
                .iter()
                .filter(|pair| pair.base_token.address == address),
        )
    }

    fn largest_by_liquidity<'a>(pairs: impl Iterator<Item = &'a DexPair>) -> Option<&'a DexPair> {
        let mut largest: Option<&DexPair> = None;
        for pair in pairs {
            match largest {
                Some(current) if pair.liquidity_usd() <= current.liquidity_usd() => {}
                _ => largest = Some(pair),
            }
        }
        largest
    }
}
