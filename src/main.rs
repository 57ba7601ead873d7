use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use log::{error, info};
use serde::Serialize;

use solana_token_data::{
    BirdEyeClient, CachedPriceSource, ClientError, Config, DexScreenerClient, PriceCache,
    PriceSource,
};

#[derive(Parser, Debug)]
#[command(name = "token-data", version, about = "Solana token prices from Birdeye and DexScreener")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price and liquidity for one or more token mints
    Prices {
        #[arg(required = true)]
        addresses: Vec<String>,
        #[arg(long, value_enum, default_value_t = Source::Birdeye)]
        source: Source,
        /// Route lookups through the in-memory price cache
        #[arg(long)]
        cached: bool,
    },
    /// Token overview (price, symbol, decimals, liquidity, supply)
    Overview {
        address: String,
        #[arg(long, value_enum, default_value_t = Source::Birdeye)]
        source: Source,
    },
    /// Most liquid SOL quoted pool for a token (DexScreener)
    LargestPool { address: String },
    /// OHLCV candles for a token (Birdeye)
    Ohlcv {
        address: String,
        #[arg(long, default_value = "15m")]
        interval: String,
        /// Unix seconds; defaults to 24h before --to
        #[arg(long)]
        from: Option<i64>,
        /// Unix seconds; defaults to now
        #[arg(long)]
        to: Option<i64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    Birdeye,
    Dexscreener,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load_from_env()?;
    info!("Loaded configuration: {:?}", config);

    if let Err(e) = run(cli.command, &config).await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, config: &Config) -> Result<(), ClientError> {
    match command {
        Command::Prices {
            addresses,
            source,
            cached,
        } => {
            let source = build_source(source, config)?;
            let prices = if cached {
                CachedPriceSource::new(
                    source,
                    PriceCache::new(config.price_cache_capacity, config.price_cache_ttl),
                )
                .fetch_prices(&addresses)
                .await?
            } else {
                source.fetch_prices(&addresses).await?
            };
            print_json(&prices)
        }
        Command::Overview { address, source } => {
            let source = build_source(source, config)?;
            print_json(&source.fetch_token_overview(&address).await?)
        }
        Command::LargestPool { address } => {
            let client = DexScreenerClient::from_config(config)?;
            print_json(&client.fetch_largest_pool_with_sol(&address).await?)
        }
        Command::Ohlcv {
            address,
            interval,
            from,
            to,
        } => {
            let to = to.unwrap_or_else(|| chrono::Utc::now().timestamp());
            let from = from.unwrap_or(to - 24 * 60 * 60);
            let client = BirdEyeClient::from_config(config)?;
            print_json(&client.fetch_ohlcv(&address, &interval, from, to).await?)
        }
    }
}

fn build_source(source: Source, config: &Config) -> Result<Box<dyn PriceSource>, ClientError> {
    let source: Box<dyn PriceSource> = match source {
        Source::Birdeye => Box::new(BirdEyeClient::from_config(config)?),
        Source::Dexscreener => Box::new(DexScreenerClient::from_config(config)?),
    };
    Ok(source)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| ClientError::Decode(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
