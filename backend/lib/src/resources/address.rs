//! SS58 presentation of account ids
//!
//! Account ids are stored as lowercase hex without `0x` prefix; the API shows
//! and accepts them as SS58 addresses of the configured network format.

use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    format: Ss58AddressFormat,
}

impl AddressCodec {
    pub fn new(format: u16) -> Self {
        Self {
            format: Ss58AddressFormat::custom(format),
        }
    }

    /// SS58 address of a hex account id, with or without `0x` prefix
    ///
    /// Returns `None` if `account_id` is not 32 hex encoded bytes.
    pub fn encode(&self, account_id: &str) -> Option<String> {
        let raw = account_id.strip_prefix("0x").unwrap_or(account_id);
        let bytes: [u8; 32] = hex::decode(raw).ok()?.try_into().ok()?;

        Some(AccountId32::new(bytes).to_ss58check_with_version(self.format))
    }

    /// Hex account id of an SS58 address of this network
    pub fn decode(&self, address: &str) -> Option<String> {
        let (account, format) = AccountId32::from_ss58check_with_version(address).ok()?;
        if format != self.format {
            return None;
        }

        Some(hex::encode(<[u8; 32]>::from(account)))
    }

    /// Account id from either a `0x` prefixed hex id or an SS58 address
    pub fn account_id(&self, value: &str) -> Option<String> {
        match value.strip_prefix("0x") {
            Some(raw) => Some(raw.to_lowercase()),
            None => self.decode(value),
        }
    }
}
