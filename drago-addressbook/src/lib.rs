#![doc = include_str!("../README.md")]
#![deny(unsafe_code, rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use ethers_core::types::{Address, Chain};

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

const TOKENS_JSON: &str = include_str!("./tokens/tokens.json");

static REFERENCE_TOKENS: Lazy<ReferenceTokens> =
    Lazy::new(|| ReferenceTokens::from_json(TOKENS_JSON).unwrap());

/// A token a Drago is expected to hold, whose address is known per network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceToken {
    /// Wrapped Ether
    Weth,
    /// 0x Protocol Token
    Zrx,
}

impl ReferenceToken {
    /// All known reference tokens
    pub const ALL: [ReferenceToken; 2] = [ReferenceToken::Weth, ReferenceToken::Zrx];

    /// The token's ticker symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            ReferenceToken::Weth => "WETH",
            ReferenceToken::Zrx => "ZRX",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            ReferenceToken::Weth => "weth",
            ReferenceToken::Zrx => "zrx",
        }
    }

    /// Returns the token's address on the chain with id `chain_id` from the built-in table.
    pub fn address(&self, chain_id: u64) -> Option<Address> {
        REFERENCE_TOKENS.address(*self, chain_id)
    }

    /// Same as [`ReferenceToken::address`], for a known [`Chain`].
    pub fn chain_address(&self, chain: Chain) -> Option<Address> {
        self.address(chain as u64)
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Thrown when parsing a symbol that is not a reference token
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown reference token: {0}")]
pub struct UnknownToken(pub String);

impl FromStr for ReferenceToken {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceToken::ALL
            .into_iter()
            .find(|token| token.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownToken(s.to_owned()))
    }
}

/// Wrapper around a hash map that maps a chain id to the token's deployed address on that chain.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Token {
    addresses: HashMap<u64, Address>,
}

impl Token {
    /// Returns the address of the token on the chain with id `chain_id`, if known.
    pub fn address(&self, chain_id: u64) -> Option<Address> {
        self.addresses.get(&chain_id).cloned()
    }
}

/// The network constant table: reference token -> chain id -> address.
///
/// [`Default`] yields the table embedded in this crate. A custom table can be read with
/// [`ReferenceTokens::from_json`] using the same shape:
///
/// ```json
/// { "weth": { "addresses": { "1": "0xc02a..." } } }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTokens {
    tokens: HashMap<String, Token>,
}

impl ReferenceTokens {
    /// Parses a table from its JSON representation
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Returns the address of `token` on the chain with id `chain_id`
    pub fn address(&self, token: ReferenceToken, chain_id: u64) -> Option<Address> {
        self.tokens.get(token.key()).and_then(|t| t.address(chain_id))
    }

    /// Sets the address of `token` on `chain_id`, returning the address it replaced.
    pub fn insert(
        &mut self,
        token: ReferenceToken,
        chain_id: u64,
        address: Address,
    ) -> Option<Address> {
        self.tokens.entry(token.key().to_owned()).or_default().addresses.insert(chain_id, address)
    }
}

impl Default for ReferenceTokens {
    fn default() -> Self {
        REFERENCE_TOKENS.clone()
    }
}

/// Fetch the address table of a reference token by its symbol. Returns None for tokens that
/// are not part of the built-in table.
pub fn token<S: AsRef<str>>(symbol: S) -> Option<Token> {
    REFERENCE_TOKENS.tokens.get(&symbol.as_ref().to_ascii_lowercase()).cloned()
}
