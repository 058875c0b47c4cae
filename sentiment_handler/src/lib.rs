pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod models;
pub mod process;
pub mod service;
