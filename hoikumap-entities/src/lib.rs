#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # hoikumap-entities
//!
//! Reusable, agnostic domain entities for the Yokohama nursery map.
//!
//! The entities only contain generic functionality that does not reveal
//! any application-specific business logic.

pub mod geo;
pub mod location;
pub mod nursery;
