pub mod adapters;
pub mod audio;
pub mod config;
pub mod http;
