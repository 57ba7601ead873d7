use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

/// True when `address` is base58 and decodes to a 32 byte public key.
pub fn is_solana_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}
