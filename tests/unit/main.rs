//! Unit tests for configuration, stores and route models

mod models_test;
mod store_test;
