/// Wrapped SOL mint.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Chain identifier DexScreener uses for Solana pairs.
pub const SOLANA_CHAIN_ID: &str = "solana";
