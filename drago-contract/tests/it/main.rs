#![cfg(not(target_arch = "wasm32"))]

mod common;

mod init;
