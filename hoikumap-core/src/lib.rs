#![cfg_attr(test, deny(warnings))]

pub mod cache;
pub mod gateways;
pub mod retry;
pub mod usecases;
