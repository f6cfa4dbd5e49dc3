use async_trait::async_trait;
use drago_contract::Drago;
use ethers_core::{
    abi::{self, Token},
    types::{
        transaction::eip2718::TypedTransaction, Address, BlockId, Bytes, NameOrAddress, TxHash,
        U256,
    },
};
use ethers_providers::{
    JsonRpcError, Middleware, MockProvider, MockResponse, PendingTransaction, Provider,
    ProviderError,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Address the proxy is bound to in the tests
pub const DRAGO: &str = "0x9f3bc0a5e1c0a4e5cc4a0c7a9b7a12ef2b4cdb8f";

pub fn drago_address() -> Address {
    DRAGO.parse().unwrap()
}

pub fn account() -> Address {
    Address::repeat_byte(0xaa)
}

/// Mocked node that records every transaction it is asked to estimate, call or submit.
/// Submission skips transaction filling and goes straight to `eth_sendTransaction`.
#[derive(Debug)]
pub struct RecordingNode {
    inner: Provider<MockProvider>,
    estimated: Mutex<Vec<TypedTransaction>>,
    called: Mutex<Vec<TypedTransaction>>,
    submitted: Mutex<Vec<TypedTransaction>>,
}

impl RecordingNode {
    pub fn new(inner: Provider<MockProvider>) -> Self {
        Self {
            inner,
            estimated: Mutex::default(),
            called: Mutex::default(),
            submitted: Mutex::default(),
        }
    }

    pub fn estimated(&self) -> Vec<TypedTransaction> {
        self.estimated.lock().unwrap().clone()
    }

    pub fn called(&self) -> Vec<TypedTransaction> {
        self.called.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<TypedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    /// True if the proxy never reached the node
    pub fn untouched(&self) -> bool {
        self.estimated().is_empty() && self.called().is_empty() && self.submitted().is_empty()
    }
}

#[async_trait]
impl Middleware for RecordingNode {
    type Error = ProviderError;
    type Provider = MockProvider;
    type Inner = Provider<MockProvider>;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn estimate_gas(
        &self,
        tx: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<U256, Self::Error> {
        self.estimated.lock().unwrap().push(tx.clone());
        self.inner.estimate_gas(tx, block).await
    }

    async fn call(
        &self,
        tx: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<Bytes, Self::Error> {
        self.called.lock().unwrap().push(tx.clone());
        self.inner.call(tx, block).await
    }

    async fn send_transaction<T: Into<TypedTransaction> + Send + Sync>(
        &self,
        tx: T,
        _block: Option<BlockId>,
    ) -> Result<PendingTransaction<'_, Self::Provider>, Self::Error> {
        let tx = tx.into();
        self.submitted.lock().unwrap().push(tx.clone());
        let tx_hash: TxHash = self.inner.request("eth_sendTransaction", [&tx]).await?;
        Ok(PendingTransaction::new(tx_hash, self.provider()))
    }
}

/// Returns an unbound proxy over a recording mocked node
pub fn setup() -> (Drago<RecordingNode>, Arc<RecordingNode>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let node = Arc::new(RecordingNode::new(provider));
    let drago = Drago::new(Arc::clone(&node));
    (drago, node, mock)
}

/// Same as [`setup`], with the proxy bound to [`DRAGO`]
pub fn initialized() -> (Drago<RecordingNode>, Arc<RecordingNode>, MockProvider) {
    let (drago, node, mock) = setup();
    drago.init(DRAGO).unwrap();
    (drago, node, mock)
}

/// Queues responses in the order the requests will be made. The mock pops from the back.
pub fn respond(mock: &MockProvider, responses: Vec<MockResponse>) {
    for response in responses.into_iter().rev() {
        mock.push_response(response);
    }
}

pub fn value<T: Serialize>(value: T) -> MockResponse {
    MockResponse::Value(serde_json::to_value(value).unwrap())
}

/// An ABI encoded `eth_call` result
pub fn returns(tokens: &[Token]) -> MockResponse {
    value(Bytes::from(abi::encode(tokens)))
}

pub fn rpc_error(message: &str) -> MockResponse {
    MockResponse::Error(JsonRpcError { code: -32000, message: message.to_owned(), data: None })
}

pub fn recipient(tx: &TypedTransaction) -> Address {
    match tx.to() {
        Some(NameOrAddress::Address(address)) => *address,
        other => panic!("unexpected recipient {other:?}"),
    }
}

pub fn selector(tx: &TypedTransaction) -> [u8; 4] {
    let data = tx.data().expect("transaction has calldata");
    [data[0], data[1], data[2], data[3]]
}

/// Decodes the arguments of `tx` against `function` of `abi`
pub fn decode_args(abi: &abi::Abi, function: &str, tx: &TypedTransaction) -> Vec<Token> {
    let function = abi.function(function).unwrap();
    assert_eq!(selector(tx), function.short_signature(), "calldata is not for {}", function.name);
    function.decode_input(&tx.data().unwrap()[4..]).unwrap()
}
