// opensheet - Google Sheets to JSON edge gateway
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod sheets;
pub mod translation;
pub mod utils;
