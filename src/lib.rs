pub mod config;
pub mod exchange;
pub mod models;
pub mod strategies;
#[cfg(test)]
pub mod test_helpers;
pub mod trading;
