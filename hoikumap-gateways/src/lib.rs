#![cfg_attr(test, deny(warnings))]

pub mod geocoding_jp;
