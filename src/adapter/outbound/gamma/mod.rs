//! Gamma market registry adapter.

mod client;

pub use client::GammaRegistry;
