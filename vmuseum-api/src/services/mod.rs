//! External services used by the API

pub mod met;
