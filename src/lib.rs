pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod identity;
pub mod model;
pub mod notify;
pub mod render;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
mod tests;
