//! Pantry Core - Shared types library.
//!
//! This crate provides common types used across all Pantry components:
//! - `storefront` - Cart synchronization controller and REST client
//! - `cli` - Terminal front end for browsing, cart editing and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, quantities, emails and phones

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
