use ethers_core::types::{Address, U256};

/// Descriptive data of a Drago, as returned by `getData()`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragoData {
    /// Fund name
    pub name: String,
    /// Share token symbol
    pub symbol: String,
    /// Price in wei the fund pays per share on redemption
    pub sell_price: U256,
    /// Price in wei the fund asks per share on purchase
    pub buy_price: U256,
}

impl From<(String, String, U256, U256)> for DragoData {
    fn from((name, symbol, sell_price, buy_price): (String, String, U256, U256)) -> Self {
        Self { name, symbol, sell_price, buy_price }
    }
}

/// Administrative data of a Drago, as returned by `getAdminData()`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragoAdminData {
    /// Account that collects transaction fees
    pub fee_collector: Address,
    /// The Drago DAO
    pub drago_dao: Address,
    /// Fee split ratio between the collector and the DAO
    pub ratio: U256,
    /// Fee charged per transaction
    pub transaction_fee: U256,
    /// Minimum holding period in seconds
    pub min_period: u32,
}

impl From<(Address, Address, U256, U256, u32)> for DragoAdminData {
    fn from(
        (fee_collector, drago_dao, ratio, transaction_fee, min_period): (
            Address,
            Address,
            U256,
            U256,
            u32,
        ),
    ) -> Self {
        Self { fee_collector, drago_dao, ratio, transaction_fee, min_period }
    }
}
