pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod histogram;
pub mod model;
pub mod scorer;
pub mod store;
// cmd and reports belong to the binary (main.rs).
