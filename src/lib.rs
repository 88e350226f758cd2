pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod review;
pub mod store;
pub mod table;
