mod binary;
mod common;
mod config;
mod engine;
mod store;
