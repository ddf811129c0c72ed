//! FlashFood Admin Core - Shared types library.
//!
//! This crate provides the types used across the FlashFood admin components:
//! - `admin` - Dashboard API client, page controllers and HTTP surface
//! - `cli` - Command-line front end for the same controllers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, entity DTOs, the response envelope and the derived
//!   customer status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
