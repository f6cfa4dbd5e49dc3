use crate::{
    abi::{DRAGO_ABI, ERC20_ABI},
    gas::pad_gas_estimate,
    required::ensure_present,
    DragoAdminData, DragoData, DragoError,
};

use drago_addressbook::{ReferenceToken, ReferenceTokens};
use ethers_contract::Contract;
use ethers_core::{
    abi::{Abi, Detokenize, Tokenize},
    types::{Address, Bytes, H256, U256},
    utils::parse_ether,
};
use ethers_providers::{Middleware, PendingTransaction};

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, trace};

/// Block index sent with `setPrices` in place of a signature expiry
const PRICES_VALID_UNTIL_BLOCK: u64 = 1;

/// Text sent with `setPrices` in place of both the signed hash and the signature
const PRICES_PLACEHOLDER: &str = "random";

type DragoResult<T, M> = Result<T, DragoError<M>>;

/// A proxy over a deployed Drago fund contract.
///
/// The proxy is created unbound and must be pointed at a deployed fund with
/// [`init`](Drago::init) before any other operation; until then every operation fails with
/// [`DragoError::Uninitialized`]. Re-initializing rebinds it to another address. Concurrent
/// callers observe either the previous or the new contract handle, never a partial one.
///
/// Read accessors are plain `eth_call`s. Write operations validate their arguments, ask the
/// node for a gas estimate, pad it by 20% (see [`pad_gas_estimate`]) and submit the
/// transaction with the padded limit. They return as soon as the node accepted the
/// transaction: await the returned [`PendingTransaction`] to wait for it to be mined.
///
/// ```no_run
/// use drago_contract::Drago;
/// use ethers_core::types::Address;
/// use ethers_providers::{Http, Provider};
/// use std::sync::Arc;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(Provider::<Http>::try_from("http://localhost:8545")?);
/// let drago = Drago::new(client);
/// drago.init("0x9f3bc0a5e1c0a4e5cc4a0c7a9b7a12ef2b4cdb8f")?;
///
/// let manager: Address = "0x8ba1f109551bd432803012645ac136ddd64dba72".parse()?;
/// let pending = drago.set_prices(manager, "1.05", "0.95").await?;
/// let receipt = pending.confirmations(1).await?;
/// # Ok(())
/// # }
/// ```
pub struct Drago<M> {
    client: Arc<M>,
    abi: Abi,
    reference_tokens: ReferenceTokens,
    instance: RwLock<Option<Arc<Contract<M>>>>,
}

impl<M: Middleware> fmt::Debug for Drago<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drago").field("address", &self.address()).finish_non_exhaustive()
    }
}

impl<M: Middleware> Drago<M> {
    /// Creates an unbound proxy talking to the node through `client`
    pub fn new(client: Arc<M>) -> Self {
        Self {
            client,
            abi: DRAGO_ABI.clone(),
            reference_tokens: ReferenceTokens::default(),
            instance: RwLock::new(None),
        }
    }

    /// Returns a [`DragoBuilder`] for configuring a proxy
    pub fn builder() -> DragoBuilder<M> {
        DragoBuilder::new()
    }

    /// Returns the address the proxy is bound to, if it was initialized
    pub fn address(&self) -> Option<Address> {
        self.instance.read().unwrap_or_else(PoisonError::into_inner).as_ref().map(|c| c.address())
    }

    /// Returns a pointer to the proxy's client
    pub fn client(&self) -> Arc<M> {
        Arc::clone(&self.client)
    }

    /// Returns the reference token table used to resolve WETH and ZRX
    pub fn reference_tokens(&self) -> &ReferenceTokens {
        &self.reference_tokens
    }

    /// Returns the contract handle, failing if [`init`](Drago::init) was never called.
    pub fn instance(&self) -> DragoResult<Arc<Contract<M>>, M> {
        self.instance
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
            .ok_or(DragoError::Uninitialized)
    }

    /// Binds the proxy to the Drago deployed at `address`, replacing any previous binding, and
    /// returns the new contract handle.
    pub fn init(&self, address: &str) -> DragoResult<Arc<Contract<M>>, M> {
        ensure_present!(address);
        let address: Address = address
            .trim()
            .parse()
            .map_err(|_| DragoError::InvalidAddress { value: address.to_owned() })?;

        let instance =
            Arc::new(Contract::<M>::new(address, self.abi.clone(), Arc::clone(&self.client)));
        *self.instance.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::clone(&instance));

        debug!(?address, "drago proxy initialized");
        Ok(instance)
    }

    /// Fetches the fund's name, symbol and share prices
    pub async fn get_metadata(&self) -> DragoResult<DragoData, M> {
        let drago = self.instance()?;
        self.read::<_, (String, String, U256, U256)>(&drago, "getMetadata", "getData", ())
            .await
            .map(Into::into)
    }

    /// Fetches the fund's fee and DAO configuration
    pub async fn get_admin_metadata(&self) -> DragoResult<DragoAdminData, M> {
        let drago = self.instance()?;
        self.read::<_, (Address, Address, U256, U256, u32)>(
            &drago,
            "getAdminMetadata",
            "getAdminData",
            (),
        )
        .await
        .map(Into::into)
    }

    /// Returns the number of shares held by `account`
    pub async fn balance_of(&self, account: Address) -> DragoResult<U256, M> {
        let drago = self.instance()?;
        ensure_present!(account);
        self.read(&drago, "balanceOf", "balanceOf", account).await
    }

    /// Returns the ether held by the fund contract itself
    pub async fn get_ether_balance(&self) -> DragoResult<U256, M> {
        let drago = self.instance()?;
        self.client.get_balance(drago.address(), None).await.map_err(DragoError::MiddlewareError)
    }

    /// Returns the fund's balance of a reference token. The token's address is looked up for
    /// the chain the client is connected to at the time of the call.
    pub async fn get_balance_of_reference_token(
        &self,
        token: ReferenceToken,
    ) -> DragoResult<U256, M> {
        let drago = self.instance()?;
        let chain_id = self.client.get_chainid().await.map_err(DragoError::MiddlewareError)?;
        let address = Some(chain_id)
            .filter(|id| *id <= U256::from(u64::MAX))
            .and_then(|id| self.reference_tokens.address(token, id.as_u64()))
            .ok_or(DragoError::UnsupportedNetwork { token, chain_id })?;

        trace!(%token, ?address, %chain_id, "resolved reference token");
        self.token_balance(&drago, "getBalanceOfReferenceToken", address).await
    }

    /// Returns the fund's WETH balance
    pub async fn get_balance_of_weth(&self) -> DragoResult<U256, M> {
        self.get_balance_of_reference_token(ReferenceToken::Weth).await
    }

    /// Returns the fund's ZRX balance
    pub async fn get_balance_of_zrx(&self) -> DragoResult<U256, M> {
        self.get_balance_of_reference_token(ReferenceToken::Zrx).await
    }

    /// Returns the fund's balance of the ERC20 token deployed at `token`
    pub async fn get_balance_of_token(&self, token: Address) -> DragoResult<U256, M> {
        let drago = self.instance()?;
        ensure_present!(token);
        self.token_balance(&drago, "getBalanceOfToken", token).await
    }

    /// Returns the total number of shares issued
    pub async fn get_total_supply(&self) -> DragoResult<U256, M> {
        let drago = self.instance()?;
        self.read(&drago, "getTotalSupply", "totalSupply", ()).await
    }

    /// Lists the assets held by the fund.
    ///
    /// Not implemented yet: always fails with [`DragoError::NotImplemented`] once initialized.
    pub async fn get_assets(&self) -> DragoResult<Vec<Address>, M> {
        self.instance()?;
        Err(DragoError::NotImplemented { operation: "getAssets" })
    }

    /// Buys shares for `amount` wei, sent as the transaction value
    pub async fn buy_shares(
        &self,
        account: Address,
        amount: U256,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, amount);
        self.estimate_and_submit(&drago, "buyShares", "buyDrago", account, Some(amount), ()).await
    }

    /// Redeems `amount` shares
    pub async fn sell_shares(
        &self,
        account: Address,
        amount: U256,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, amount);
        self.estimate_and_submit(&drago, "sellShares", "sellDrago", account, None, amount).await
    }

    /// Sets the share prices. Prices are decimal ether amounts (e.g. `"1.5"`) and are sent in
    /// wei, sell price first.
    pub async fn set_prices(
        &self,
        account: Address,
        buy_price: &str,
        sell_price: &str,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, buy_price, sell_price);

        let buy_price = parse_ether(buy_price.trim())
            .map_err(|source| DragoError::InvalidPrice { field: "buy_price", source })?;
        let sell_price = parse_ether(sell_price.trim())
            .map_err(|source| DragoError::InvalidPrice { field: "sell_price", source })?;

        let args = (
            sell_price,
            buy_price,
            U256::from(PRICES_VALID_UNTIL_BLOCK),
            placeholder_hash(),
            Bytes::from(PRICES_PLACEHOLDER.as_bytes().to_vec()),
        );
        self.estimate_and_submit(&drago, "setPrices", "setPrices", account, None, args).await
    }

    /// Moves `amount` wei of the fund's ether to `exchange`
    pub async fn deposit_to_exchange(
        &self,
        account: Address,
        exchange: Address,
        amount: U256,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, exchange, amount);
        self.estimate_and_submit(
            &drago,
            "depositToExchange",
            "depositToExchange",
            account,
            None,
            (exchange, amount),
        )
        .await
    }

    /// Cancels order `trade_id` on contract `cfd` of the CFD exchange `exchange`
    pub async fn cancel_order_cfd_exchange(
        &self,
        account: Address,
        exchange: Address,
        cfd: Address,
        trade_id: u32,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, exchange, cfd, trade_id);
        self.estimate_and_submit(
            &drago,
            "cancelOrderCFDExchange",
            "cancelOrderCFDExchange",
            account,
            None,
            (account, exchange, cfd, trade_id),
        )
        .await
    }

    /// Places an order on contract `cfd` of the CFD exchange `exchange`
    #[allow(clippy::too_many_arguments)]
    pub async fn place_order_cfd_exchange(
        &self,
        account: Address,
        exchange: Address,
        cfd: Address,
        is_stable: bool,
        adjustment: u32,
        stake: U256,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M> {
        let drago = self.instance()?;
        ensure_present!(account, exchange, cfd, is_stable, adjustment, stake);
        self.estimate_and_submit(
            &drago,
            "placeOrderCFDExchange",
            "placeOrderCFDExchange",
            account,
            None,
            (account, exchange, cfd, is_stable, adjustment, stake),
        )
        .await
    }

    async fn read<T, D>(
        &self,
        contract: &Contract<M>,
        operation: &'static str,
        function: &str,
        args: T,
    ) -> DragoResult<D, M>
    where
        T: Tokenize,
        D: Detokenize,
    {
        trace!(operation, address = ?contract.address(), function, "eth_call");
        contract
            .method::<_, D>(function, args)?
            .call()
            .await
            .map_err(|source| DragoError::Call { operation, source })
    }

    async fn token_balance(
        &self,
        drago: &Contract<M>,
        operation: &'static str,
        token: Address,
    ) -> DragoResult<U256, M> {
        let erc20 = Contract::<M>::new(token, ERC20_ABI.clone(), Arc::clone(&self.client));
        self.read(&erc20, operation, "balanceOf", drago.address()).await
    }

    /// Estimates the gas of `function(args)` sent from `from`, pads the estimate and submits the
    /// transaction with the padded gas limit. A failed estimate is returned as is and nothing
    /// is submitted.
    #[allow(clippy::too_many_arguments)]
    async fn estimate_and_submit<T>(
        &self,
        contract: &Contract<M>,
        operation: &'static str,
        function: &str,
        from: Address,
        value: Option<U256>,
        args: T,
    ) -> DragoResult<PendingTransaction<'_, M::Provider>, M>
    where
        T: Tokenize + fmt::Debug,
    {
        let rendered = format!("{args:?}");
        let mut call = contract.method::<_, H256>(function, args)?.from(from);
        if let Some(value) = value {
            call = call.value(value);
        }

        let estimate = call.estimate_gas().await.map_err(|source| {
            DragoError::TransactionEstimation { operation, args: rendered.clone(), source }
        })?;
        let gas = pad_gas_estimate(estimate);
        debug!(operation, %estimate, %gas, "gas estimated, submitting with padded limit");

        let call = call.gas(gas);
        let tx_hash = {
            let pending = call.send().await.map_err(|source| {
                DragoError::TransactionSubmission { operation, args: rendered, source }
            })?;
            *pending
        };

        debug!(operation, ?tx_hash, "transaction submitted");
        Ok(PendingTransaction::new(tx_hash, self.client.provider()))
    }
}

/// `PRICES_PLACEHOLDER` right-padded to 32 bytes
fn placeholder_hash() -> H256 {
    let mut hash = H256::zero();
    hash.as_bytes_mut()[..PRICES_PLACEHOLDER.len()].copy_from_slice(PRICES_PLACEHOLDER.as_bytes());
    hash
}

/// Builder for a [`Drago`] proxy.
///
/// ```no_run
/// use drago_contract::{Drago, ReferenceToken, ReferenceTokens};
/// use ethers_core::types::Address;
/// use ethers_providers::{Http, Provider};
/// use std::sync::Arc;
///
/// # fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tokens = ReferenceTokens::default();
/// tokens.insert(ReferenceToken::Weth, 31337, Address::repeat_byte(0xee));
///
/// let drago = Drago::builder()
///     .client(Arc::new(Provider::<Http>::try_from("http://localhost:8545")?))
///     .reference_tokens(tokens)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DragoBuilder<M> {
    client: Option<Arc<M>>,
    reference_tokens: Option<ReferenceTokens>,
}

impl<M> Default for DragoBuilder<M> {
    fn default() -> Self {
        Self { client: None, reference_tokens: None }
    }
}

impl<M: Middleware> DragoBuilder<M> {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client used to reach the node. Required.
    #[must_use]
    pub fn client(mut self, client: Arc<M>) -> Self {
        self.client = Some(client);
        self
    }

    /// Overrides the built-in reference token table
    #[must_use]
    pub fn reference_tokens(mut self, tokens: ReferenceTokens) -> Self {
        self.reference_tokens = Some(tokens);
        self
    }

    /// Builds the proxy, failing with [`DragoError::Configuration`] if no client was set
    pub fn build(self) -> DragoResult<Drago<M>, M> {
        let client =
            self.client.ok_or(DragoError::Configuration("an RPC client needs to be provided"))?;
        let mut drago = Drago::new(client);
        if let Some(tokens) = self.reference_tokens {
            drago.reference_tokens = tokens;
        }
        Ok(drago)
    }
}
