//! FlashFood admin dashboard library.
//!
//! Backend for the FlashFood operations dashboard: a typed client for the
//! FlashFood REST API, page controllers holding the state of each
//! dashboard page, and the JSON HTTP surface that drives them.
//!
//! # Security
//!
//! The backend bearer token is held in memory only and never logged.
//! Bind to loopback unless the host is otherwise protected.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod middleware;
pub mod navigation;
pub mod pages;
pub mod routes;
pub mod state;
