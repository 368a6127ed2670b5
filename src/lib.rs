// Design Patterns Catalog
// Twenty-two classic patterns, each a runnable demo that narrates its
// participants talking to each other.

//! # Design Patterns Quick Reference
//!
//! ## Creational
//! - Abstract Factory (platform widget families)
//! - Builder (director + step builder)
//! - Factory Method (creator subtypes)
//! - Prototype (Clone)
//! - Singleton (injected lazy holder)
//!
//! ## Structural
//! - Adapter (media formats)
//! - Bridge (payment processors x payment methods)
//! - Composite (product bundles)
//! - Decorator (coffee condiments)
//! - Facade (home theater)
//! - Flyweight (forest of shared tree types)
//! - Proxy (lazy image loading)
//!
//! ## Behavioral
//! - Chain of Responsibility (support tiers)
//! - Command (remote control with undo)
//! - Iterator (custom iterators, IntoIterator)
//! - Mediator (chat room)
//! - Memento (editor snapshots)
//! - Observer (weather station)
//! - State (bank account tiers)
//! - Strategy (payment methods)
//! - Template Method (hot beverages)
//! - Visitor (computer parts)
//!
//! Run demos with:
//! ```bash
//! cargo run -- list
//! cargo run -- run observer proxy
//! cargo run --bin p1_creational
//! cargo run --bin p2_structural
//! cargo run --bin p3_behavioral
//! ```

pub mod behavioral;
pub mod catalog;
pub mod config;
pub mod creational;
pub mod error;
pub mod narration;
pub mod structural;
pub mod telemetry;

pub use catalog::{Demo, Family, CATALOG};
pub use config::Settings;
pub use error::{PatternError, Result};
pub use narration::Narrator;
