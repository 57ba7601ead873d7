pub mod constants;
pub mod helpers;
pub mod serde_helpers;

pub use constants::{SOLANA_CHAIN_ID, SOL_MINT, USDC_MINT};
pub use helpers::is_solana_address;
pub use serde_helpers::deserialize_lenient_decimal;
