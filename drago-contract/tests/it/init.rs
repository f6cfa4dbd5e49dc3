use crate::common::*;
use drago_contract::{Drago, DragoError};
use ethers_core::types::Address;
use std::thread;

#[test]
fn rejects_empty_address() {
    let (drago, node, _mock) = setup();
    for address in ["", "   "] {
        let err = drago.init(address).unwrap_err();
        assert_eq!(err.missing_field(), Some("address"));
    }
    assert!(drago.address().is_none());
    assert!(node.untouched());
}

#[test]
fn rejects_malformed_address() {
    let (drago, _node, _mock) = setup();
    let err = drago.init("0xnotanaddress").unwrap_err();
    assert!(matches!(err, DragoError::InvalidAddress { ref value } if value == "0xnotanaddress"));
    assert!(matches!(drago.instance(), Err(DragoError::Uninitialized)));
}

#[test]
fn init_binds_and_rebinds() {
    let (drago, _node, _mock) = setup();
    assert!(matches!(drago.instance(), Err(DragoError::Uninitialized)));

    let handle = drago.init(DRAGO).unwrap();
    assert_eq!(handle.address(), drago_address());
    assert_eq!(drago.instance().unwrap().address(), drago_address());

    let other = "0x00000000000000000000000000000000000000ff";
    drago.init(other).unwrap();
    assert_eq!(drago.address(), Some(other.parse().unwrap()));
    // handles returned earlier are not mutated
    assert_eq!(handle.address(), drago_address());
}

#[test]
fn builder_requires_client() {
    let err = Drago::<RecordingNode>::builder().build().unwrap_err();
    assert!(matches!(err, DragoError::Configuration(_)));

    let (_drago, node, _mock) = setup();
    let drago = Drago::builder().client(node).build().unwrap();
    assert!(drago.address().is_none());
}

#[test]
fn concurrent_readers_see_whole_handles() {
    let (drago, _node, _mock) = setup();
    let first: Address = DRAGO.parse().unwrap();
    let second = Address::repeat_byte(0x22);
    let second_str = format!("{second:?}");

    drago.init(DRAGO).unwrap();
    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..200 {
                let address = if i % 2 == 0 { second_str.as_str() } else { DRAGO };
                drago.init(address).unwrap();
            }
        });
        s.spawn(|| {
            for _ in 0..200 {
                let address = drago.instance().unwrap().address();
                assert!(address == first || address == second);
            }
        });
    });
}
