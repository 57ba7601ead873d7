use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;

use crate::birdeye::BirdEyeClient;
use crate::dexscreener::DexScreenerClient;
use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::prices::PriceCache;
use crate::types::{PriceInfo, TokenOverview};

/// Anything that can price tokens and describe them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError>;

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError>;
}

#[async_trait]
impl<T: HttpTransport> PriceSource for BirdEyeClient<T> {
    fn name(&self) -> &'static str {
        "birdeye"
    }

    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        BirdEyeClient::fetch_prices(self, token_addresses).await
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        BirdEyeClient::fetch_token_overview(self, address).await
    }
}

#[async_trait]
impl<T: HttpTransport> PriceSource for DexScreenerClient<T> {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        self.fetch_prices_dex(token_addresses).await
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        DexScreenerClient::fetch_token_overview(self, address).await
    }
}

#[async_trait]
impl<S: PriceSource + ?Sized> PriceSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        (**self).fetch_prices(token_addresses).await
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        (**self).fetch_token_overview(address).await
    }
}

/// Wraps a source so repeated price lookups within the TTL skip the network.
/// Overviews are always fetched fresh.
pub struct CachedPriceSource<S> {
    inner: S,
    cache: PriceCache,
}

impl<S: PriceSource> CachedPriceSource<S> {
    pub fn new(inner: S, cache: PriceCache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for CachedPriceSource<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo<Decimal, Decimal>>, ClientError> {
        if token_addresses.is_empty() {
            return Err(ClientError::NoPositions);
        }

        let mut prices = HashMap::with_capacity(token_addresses.len());
        let mut misses: Vec<String> = Vec::new();
        for address in token_addresses {
            if prices.contains_key(address) || misses.contains(address) {
                continue;
            }
            match self.cache.get(address).await {
                Some(info) => {
                    prices.insert(address.clone(), info);
                }
                None => misses.push(address.clone()),
            }
        }

        debug!(
            "{} price cache: {} hits, {} misses",
            self.inner.name(),
            prices.len(),
            misses.len()
        );

        if !misses.is_empty() {
            let fetched = self.inner.fetch_prices(&misses).await?;
            for (address, info) in fetched {
                self.cache.insert(address.clone(), info).await;
                prices.insert(address, info);
            }
        }

        Ok(prices)
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview, ClientError> {
        self.inner.fetch_token_overview(address).await
    }
}
