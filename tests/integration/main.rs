//! Integration tests: the full router against mocked upstream services

mod api_tests;
mod proxy_tests;
mod transport_tests;
