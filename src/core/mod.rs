pub mod cli;
pub mod context;
pub mod loader;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;
#[cfg(test)]
mod tests;
pub mod time;
pub mod types;
