use drago_addressbook::ReferenceToken;
use ethers_contract::{AbiError, ContractError};
use ethers_core::{types::U256, utils::ConversionError};
use ethers_providers::Middleware;
use thiserror::Error;

/// An Error which is thrown when interacting with a Drago through the proxy
#[derive(Error, Debug)]
pub enum DragoError<M: Middleware> {
    /// Thrown when the proxy is built without a required collaborator
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    /// Thrown when a required argument is missing. Raised before any request is sent.
    #[error("{field} needs to be provided")]
    InvalidArgument {
        /// Name of the first missing argument
        field: &'static str,
    },

    /// Thrown when the contract address passed to `init` is not a valid address
    #[error("invalid contract address: {value}")]
    InvalidAddress {
        /// The rejected input
        value: String,
    },

    /// Thrown when an operation runs before `init` bound the proxy to a contract
    #[error("the contract needs to be initialized")]
    Uninitialized,

    /// Thrown when the node fails to estimate gas for a transaction. Nothing was submitted.
    #[error("gas estimation for `{operation}` with {args} failed: {source}")]
    TransactionEstimation {
        /// The proxy operation
        operation: &'static str,
        /// Debug rendering of the argument tuple
        args: String,
        /// The underlying contract error
        source: ContractError<M>,
    },

    /// Thrown when submitting a transaction fails after a successful estimate
    #[error("submitting `{operation}` with {args} failed: {source}")]
    TransactionSubmission {
        /// The proxy operation
        operation: &'static str,
        /// Debug rendering of the argument tuple
        args: String,
        /// The underlying contract error
        source: ContractError<M>,
    },

    /// Thrown when a read-only contract call fails
    #[error("call to `{operation}` failed: {source}")]
    Call {
        /// The proxy operation
        operation: &'static str,
        /// The underlying contract error
        source: ContractError<M>,
    },

    /// Thrown when a function is missing from the ABI or its arguments fail to encode
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Thrown when a price cannot be converted to wei
    #[error("invalid {field}: {source}")]
    InvalidPrice {
        /// Name of the price argument
        field: &'static str,
        /// The conversion failure
        source: ConversionError,
    },

    /// Thrown when the address book has no entry for a reference token on the active network
    #[error("{token} is not deployed on chain {chain_id}")]
    UnsupportedNetwork {
        /// The requested token
        token: ReferenceToken,
        /// The chain id reported by the node
        chain_id: U256,
    },

    /// Thrown when a direct node query fails
    #[error("{0}")]
    MiddlewareError(M::Error),

    /// Thrown by operations that are recognized but have no implementation yet
    #[error("`{operation}` is not implemented")]
    NotImplemented {
        /// The proxy operation
        operation: &'static str,
    },
}

impl<M: Middleware> DragoError<M> {
    /// Returns the name of the missing argument if this is an `InvalidArgument` error
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            DragoError::InvalidArgument { field } => Some(*field),
            _ => None,
        }
    }
}
