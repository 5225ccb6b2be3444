//! Page modules - the app is a single view

pub mod donate;

pub use donate::DonatePage;
