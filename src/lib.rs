#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # drago
//!
//! Client-side bindings for RigoBlock Drago fund contracts, built on top of
//! [ethers-rs](https://github.com/gakonst/ethers-rs).
//!
//! # Quickstart
//!
//! A prelude is provided which imports the important types. Connect a provider,
//! bind the proxy to a deployed fund and start querying it.
//!
//! ```no_run
//! use drago::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::<Http>::try_from("http://localhost:8545")?;
//! let drago = Drago::new(Arc::new(provider));
//! drago.init("0x9f3bc0a5e1c0a4e5cc4a0c7a9b7a12ef2b4cdb8f")?;
//!
//! let data = drago.get_metadata().await?;
//! println!("{} ({}) sells at {}", data.name, data.symbol, data.sell_price);
//! # Ok(())
//! # }
//! ```

/// # Drago fund contract proxy
///
/// Wraps a deployed Drago behind typed read accessors and write operations that
/// estimate gas, pad the estimate and submit the transaction.
pub mod contract {
    pub use drago_contract::*;
}

/// # Reference token address book
///
/// Per-chain addresses of the tokens a Drago keeps balances in (WETH, ZRX).
pub mod addressbook {
    pub use drago_addressbook::*;
}

/// Re-export of `ethers-core`
pub mod core {
    pub use ethers_core::*;
}

/// Re-export of `ethers-providers`
pub mod providers {
    pub use ethers_providers::*;
}

/// Easy imports of frequently used type definitions and traits
pub mod prelude {
    pub use super::addressbook::{ReferenceToken, ReferenceTokens};
    pub use super::contract::{Drago, DragoAdminData, DragoBuilder, DragoData, DragoError};

    pub use ethers_core::types::*;
    pub use ethers_providers::{Http, Middleware, PendingTransaction, Provider};
}
