//! Front-end utilities

pub mod constants;
