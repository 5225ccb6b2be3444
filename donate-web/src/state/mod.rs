//! Reactive application state

pub mod bridge;
