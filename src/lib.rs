pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod media;
pub mod paths;
pub mod purchase;
pub mod quiz;
pub mod session;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
