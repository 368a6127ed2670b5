//! Behavioral patterns: how objects distribute responsibility and talk to
//! each other.

pub mod chain;
pub mod command;
pub mod iterator;
pub mod mediator;
pub mod memento;
pub mod observer;
pub mod state;
pub mod strategy;
pub mod template_method;
pub mod visitor;
