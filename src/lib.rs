#![forbid(unsafe_code)]

pub mod account_store;
pub mod command_handler;
pub mod command_parser;
pub mod csv_writer;
pub mod error;
pub mod shared_store;
pub mod types;
pub mod validation;
