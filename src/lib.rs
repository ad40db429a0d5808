pub mod api;
pub mod config;
pub mod pages;
pub mod requests;
pub mod ui;

#[cfg(test)]
mod testing;
