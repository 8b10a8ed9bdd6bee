// src/register/mod.rs
pub mod client;
pub mod dates;
pub mod models;
