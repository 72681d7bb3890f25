//! Core business logic for Kasbon.
//!
//! This crate contains pure business logic with ZERO storage or async
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `tenancy` - Ownership filtering and scope stamping
//! - `account` - Customer account rules and lifecycle
//! - `journal` - Append-only transaction entries and replay
//! - `statement` - Read-only account statement building

pub mod account;
pub mod journal;
pub mod statement;
pub mod tenancy;
