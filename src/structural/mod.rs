//! Structural patterns: how types compose into larger structures without the
//! client caring about the wiring.

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod decorator;
pub mod facade;
pub mod flyweight;
pub mod proxy;
