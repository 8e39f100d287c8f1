//! Feature implementations

pub mod translator;
