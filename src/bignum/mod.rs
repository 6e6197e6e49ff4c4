//! Exact arbitrary-precision arithmetic: naturals, integers, and rationals
//! over a shared decimal-power radix, built on a truncating host-integer
//! primitive layer.
//!
//! Module order mirrors the dependency chain: [`machine_int`] underlies
//! [`natural`], which underlies [`integer`], which underlies [`rational`].

pub mod integer;
pub mod machine_int;
pub mod natural;
pub mod rational;

pub use integer::{IntBig, Sign};
pub use machine_int::MachineInt;
pub use natural::NatBig;
pub use rational::RatBig;
