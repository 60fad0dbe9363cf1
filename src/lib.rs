// src/lib.rs — Library root for autocoder

pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
pub mod util;
