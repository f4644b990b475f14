//! GPS Pay Core - Shared types library.
//!
//! This crate provides common types used across all GPS Pay components:
//! - `portal` - Public merchant registration and dashboard site
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. Every value that crosses a component boundary (wizard drafts,
//! backend records, session identities) is built from these types, and every
//! type validates its invariants at construction.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and the tagged business-profile union

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
