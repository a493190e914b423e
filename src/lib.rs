pub mod app;
pub mod config;
pub mod db;
pub mod session;
#[cfg(test)]
mod test_helpers;
pub mod tracing;
