//! Shared test fixtures for hyperplane crates.
//!
//! - [`landscapes`] - seeded landscape generators
//! - [`brute`] - brute-force oracles for fitness, moves and local optima
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! hyperplane-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use hyperplane_test::{brute, landscapes};
//!
//! let landscape = landscapes::deceptive_trap(12, 4, 0);
//! let optima = brute::local_optima(&landscape, 1);
//! ```

pub mod brute;
pub mod landscapes;
