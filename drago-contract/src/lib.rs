#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod drago;
pub use drago::{Drago, DragoBuilder};

mod error;
pub use error::DragoError;

mod types;
pub use types::{DragoAdminData, DragoData};

pub mod abi;

mod gas;
pub use gas::{pad_gas_estimate, GAS_MULTIPLIER_DENOMINATOR, GAS_MULTIPLIER_NUMERATOR};

mod required;
pub use required::Required;

pub use drago_addressbook::{ReferenceToken, ReferenceTokens};
