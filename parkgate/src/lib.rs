pub mod app;
pub mod config;
pub mod hal;
pub mod svc;

#[cfg(test)]
mod sim;
