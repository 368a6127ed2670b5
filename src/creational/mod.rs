//! Creational patterns: who builds objects, and how callers stay ignorant of
//! the concrete types they get back.

pub mod abstract_factory;
pub mod builder;
pub mod factory_method;
pub mod prototype;
pub mod singleton;
