//! Shape of the sample chain served in mock mode and used across tests

/// Accounts of the sample chain
pub mod accounts {
    /// Alice's public key, hex encoded without prefix
    pub const ALICE_ACCOUNT_ID: &str =
        "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    /// Alice's address in the generic Substrate format (42)
    pub const ALICE_SS58: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    /// Bob's public key, hex encoded without prefix
    pub const BOB_ACCOUNT_ID: &str =
        "8eaf04151687736326c9fea17e25fc5287613693c912909cb226aa4794f26a48";

    /// Bob's address in the generic Substrate format (42)
    pub const BOB_SS58: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
}

pub mod chain {
    /// Number of blocks, numbered from 1
    pub const BLOCK_COUNT: i32 = 30;

    /// Extrinsics per block: one timestamp inherent followed by one signed transfer
    pub const EXTRINSICS_PER_BLOCK: i32 = 2;

    /// Events per block: a transfer surrounded by the system bookkeeping events
    pub const EVENTS_PER_BLOCK: i32 = 3;

    /// Spec version of the only runtime
    pub const SPEC_VERSION: i32 = 1;

    /// Amount moved from Alice to Bob in every block
    pub const TRANSFER_VALUE: i64 = 1_000_000_000;

    /// Fee paid by Alice for every transfer
    pub const TRANSFER_FEE: i64 = 10_000;

    /// Unix timestamp of block 1, later blocks follow every 6 seconds
    pub const GENESIS_TIMESTAMP: i64 = 1_556_712_000;
}
