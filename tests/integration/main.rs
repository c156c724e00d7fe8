//! Integration tests for Hop-Crawl
//!
//! These tests use wiremock to serve small link graphs and run the full
//! coordinator/worker pipeline against them.

mod crawl_tests;
