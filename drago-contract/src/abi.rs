//! Human readable ABIs of the contracts the proxy talks to.

use ethers_core::abi::{parse_abi, Abi};
use once_cell::sync::Lazy;

/// The Drago fund contract ABI
pub static DRAGO_ABI: Lazy<Abi> = Lazy::new(|| {
    parse_abi(&[
        "function getData() view returns (string name, string symbol, uint256 sellPrice, uint256 buyPrice)",
        "function getAdminData() view returns (address feeCollector, address dragoDao, uint256 ratio, uint256 transactionFee, uint32 minPeriod)",
        "function balanceOf(address _who) view returns (uint256)",
        "function totalSupply() view returns (uint256)",
        "function buyDrago() payable returns (bool success)",
        "function sellDrago(uint256 _amount) returns (bool success)",
        "function setPrices(uint256 _newSellPrice, uint256 _newBuyPrice, uint256 _signaturevaliduntilBlock, bytes32 _hash, bytes _signedData)",
        "function depositToExchange(address _exchange, uint256 _amount) returns (bool success)",
        "function cancelOrderCFDExchange(address _account, address _cfdExchange, address _cfd, uint32 _id)",
        "function placeOrderCFDExchange(address _account, address _cfdExchange, address _cfd, bool _isStable, uint32 _adjustment, uint256 _stake)",
    ])
    .expect("drago ABI is valid")
});

/// The subset of the ERC20 ABI needed to read token balances
pub static ERC20_ABI: Lazy<Abi> = Lazy::new(|| {
    parse_abi(&[
        "function balanceOf(address _owner) view returns (uint256 balance)",
        "function totalSupply() view returns (uint256)",
    ])
    .expect("ERC20 ABI is valid")
});
