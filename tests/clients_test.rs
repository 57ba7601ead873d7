use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use zeroize::Zeroizing;

use solana_token_data::{
    BirdEyeClient, CachedPriceSource, ClientError, DexScreenerClient, HttpRequest, HttpResponse,
    HttpTransport, PriceCache, PriceSource, SOL_MINT,
};

const JUP: &str = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN";

/// Replays canned responses in order and records every request it saw.
struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Network("no scripted response left".to_string()))
    }
}

#[async_trait]
impl<'a> HttpTransport for &'a ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        (**self).send(request).await
    }
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[tokio::test]
async fn birdeye_prices_are_served_from_cache_on_repeat() {
    let transport = ScriptedTransport::new(vec![HttpResponse::new(
        200,
        format!(
            r#"{{"success":true,"data":{{"{}":{{"value":142.5,"liquidity":900}},"{}":{{"value":"0.85","liquidity":120}}}}}}"#,
            SOL_MINT, JUP
        ),
    )]);
    let client = BirdEyeClient::new(
        &transport,
        "https://public-api.birdeye.so/defi",
        "solana",
        Zeroizing::new("key".to_string()),
    );
    let source = CachedPriceSource::new(client, PriceCache::new(16, Duration::from_secs(60)));
    let tokens = vec![SOL_MINT.to_string(), JUP.to_string()];

    let first = source.fetch_prices(&tokens).await.unwrap();
    let second = source.fetch_prices(&tokens).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second[JUP].price, dec("0.85"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header_value("X-API-KEY"), Some("key"));
    assert_eq!(requests[0].query_value("include_liquidity"), Some("true"));
}

#[tokio::test]
async fn dexscreener_overview_and_pool_lookup() {
    let body = format!(
        r#"{{"schemaVersion":"1.0.0","pairs":[
            {{"chainId":"solana","dexId":"meteora","pairAddress":"jup-sol",
              "baseToken":{{"address":"{jup}","name":"Jupiter","symbol":"JUP"}},
              "quoteToken":{{"address":"{sol}","symbol":"SOL"}},
              "priceUsd":"0.80","liquidity":{{"usd":400000}},"fdv":8000000000}},
            {{"chainId":"solana","dexId":"raydium","pairAddress":"jup-sol-2",
              "baseToken":{{"address":"{jup}","symbol":"JUP"}},
              "quoteToken":{{"address":"{sol}","symbol":"SOL"}},
              "priceUsd":"0.81","liquidity":{{"usd":900000}},"fdv":8100000000}}
        ]}}"#,
        jup = JUP,
        sol = SOL_MINT
    );
    let transport = ScriptedTransport::new(vec![
        HttpResponse::new(200, body.clone()),
        HttpResponse::new(200, body),
    ]);
    let client = DexScreenerClient::new(&transport, "https://api.dexscreener.com/latest/dex");

    let overview = client.fetch_token_overview(JUP).await.unwrap();
    assert_eq!(overview.symbol, "JUP");
    assert_eq!(overview.price, dec("0.81"));
    assert_eq!(overview.supply, Some(dec("10000000000")));

    let pool = client.fetch_largest_pool_with_sol(JUP).await.unwrap().unwrap();
    assert_eq!(pool.pair_address, "jup-sol-2");

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("https://api.dexscreener.com/latest/dex/tokens/{}", JUP),
            format!("https://api.dexscreener.com/latest/dex/tokens/{}", JUP),
        ]
    );
}

#[tokio::test]
async fn transport_failures_surface_to_caller() {
    let transport = ScriptedTransport::new(vec![]);
    let client = DexScreenerClient::new(&transport, "https://api.dexscreener.com/latest/dex");

    let err = client.fetch_prices_dex(&[SOL_MINT.to_string()]).await.unwrap_err();
    assert!(err.is_retryable());
}
