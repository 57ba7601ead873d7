use std::collections::HashMap;

use futures::future::try_join_all;
use log::{debug, error, info};
use rust_decimal::Decimal;
use zeroize::Zeroizing;

use crate::birdeye::types::{BirdeyeOhlcvItems, BirdeyeResponse, MultiPriceData, TokenOverviewData};
use crate::config::Config;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{OhlcvCandle, PriceInfo, TokenOverview};
use crate::utils::is_solana_address;

/// Addresses per `multi_price` call.
pub const MULTI_PRICE_BATCH_SIZE: usize = 100;

/// Client for the Birdeye public API.
pub struct BirdEyeClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    chain: String,
    api_key: Zeroizing<String>,
}

impl BirdEyeClient<ReqwestTransport> {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let api_key = config.require_bird_eye_token()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(
            transport,
            config.bird_eye_url.clone(),
            config.bird_eye_chain.clone(),
            api_key,
        ))
    }
}

impl<T: HttpTransport> BirdEyeClient<T> {
    pub fn new(
        transport: T,
        base_url: impl Into<String>,
        chain: impl Into<String>,
        api_key: Zeroizing<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            chain: chain.into(),
            api_key,
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), "application/json".to_string()),
            ("x-chain".to_string(), self.chain.clone()),
            ("X-API-KEY".to_string(), self.api_key.as_str().to_string()),
        ]
    }

    /// Sends an authenticated call; `method` must be GET or POST.
    pub async fn make_api_call(
        &self,
        method: &str,
        query_url: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, ClientError> {
        let method = HttpMethod::parse(method, query_url)?;
        let request = HttpRequest::new(method, query_url)
            .headers(self.headers())
            .query(query);

        debug!("Birdeye {:?} {} {:?}", method, query_url, request.query);
        self.transport.send(request).await
    }

    /// Fetches price and liquidity for every address, failing if any token
    /// comes back without a price.
    pub async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        if token_addresses.is_empty() {
            return Err(ClientError::NoPositions);
        }

        let query_url = format!("{}/multi_price", self.base_url);
        let batches = token_addresses
            .chunks(MULTI_PRICE_BATCH_SIZE)
            .map(|batch| self.fetch_price_batch(&query_url, batch));

        let mut prices = HashMap::with_capacity(token_addresses.len());
        for batch in try_join_all(batches).await? {
            prices.extend(batch);
        }

        info!("Fetched Birdeye prices for {} tokens", prices.len());
        Ok(prices)
    }

    async fn fetch_price_batch(
        &self,
        query_url: &str,
        batch: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        let resp = self
            .make_api_call(
                "GET",
                query_url,
                vec![
                    ("list_address".to_string(), batch.join(",")),
                    ("include_liquidity".to_string(), "true".to_string()),
                ],
            )
            .await?;

        if !resp.is_ok() {
            error!("Birdeye multi_price returned status {}", resp.status);
            return Err(ClientError::InvalidTokens {
                status: resp.status,
            });
        }

        let body: BirdeyeResponse<MultiPriceData> = resp.json()?;
        let data = body
            .data
            .ok_or_else(|| ClientError::EmptyData("multi_price".to_string()))?;

        batch
            .iter()
            .map(|address| {
                let item = data
                    .get(address)
                    .and_then(Option::as_ref)
                    .ok_or_else(|| ClientError::MissingPrice(address.clone()))?;
                let price = item
                    .value
                    .ok_or_else(|| ClientError::MissingPrice(address.clone()))?;
                let liquidity = item
                    .liquidity
                    .ok_or_else(|| ClientError::NoLiquidity(address.clone()))?;
                Ok((address.clone(), PriceInfo::new(price, liquidity)))
            })
            .collect()
    }

    pub async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        if !is_solana_address(address) {
            return Err(ClientError::InvalidSolanaAddress(address.to_string()));
        }

        let query_url = format!("{}/token_overview", self.base_url);
        let resp = self
            .make_api_call(
                "GET",
                &query_url,
                vec![("address".to_string(), address.to_string())],
            )
            .await?;

        if !resp.is_ok() {
            error!("Birdeye token_overview returned status {}", resp.status);
            return Err(ClientError::InvalidTokens {
                status: resp.status,
            });
        }

        let body: BirdeyeResponse<TokenOverviewData> = resp.json()?;
        let data = body
            .data
            .ok_or_else(|| ClientError::EmptyData(format!("token_overview {}", address)))?;

        Ok(TokenOverview {
            price: data
                .price
                .ok_or_else(|| ClientError::MissingPrice(address.to_string()))?,
            symbol: data.symbol.unwrap_or_default(),
            decimals: Some(
                data.decimals
                    .ok_or_else(|| ClientError::DecimalsNotFound(address.to_string()))?,
            ),
            last_trade_unix_time: data.last_trade_unix_time,
            liquidity: data
                .liquidity
                .ok_or_else(|| ClientError::NoLiquidity(address.to_string()))?,
            supply: data.supply,
        })
    }

    /// Candles between `time_from` and `time_to` (unix seconds), oldest first.
    pub async fn fetch_ohlcv(
        &self,
        address: &str,
        interval: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<Vec<OhlcvCandle>, ClientError> {
        if !is_solana_address(address) {
            return Err(ClientError::InvalidSolanaAddress(address.to_string()));
        }
        if time_from > time_to {
            return Err(ClientError::InvalidTimeRange {
                from: time_from,
                to: time_to,
            });
        }

        let query_url = format!("{}/ohlcv", self.base_url);
        let resp = self
            .make_api_call(
                "GET",
                &query_url,
                vec![
                    ("address".to_string(), address.to_string()),
                    ("type".to_string(), interval.to_string()),
                    ("time_from".to_string(), time_from.to_string()),
                    ("time_to".to_string(), time_to.to_string()),
                ],
            )
            .await?;

        if !resp.is_ok() {
            return Err(ClientError::InvalidTokens {
                status: resp.status,
            });
        }

        let body: BirdeyeResponse<BirdeyeOhlcvItems> = resp.json()?;
        let mut candles: Vec<OhlcvCandle> = body
            .data
            .map(|data| data.items)
            .unwrap_or_default()
            .into_iter()
            .map(OhlcvCandle::from)
            .collect();
        candles.sort_by_key(|candle| candle.unix_time);

        Ok(candles)
    }
}
