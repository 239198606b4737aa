//! Minimal one-shot DNS client for talking to a test server.
//!
//! Enough to send one question and read one reply over UDP; code under test
//! normally brings its own resolver.

pub mod message_builder;
pub mod udp;

pub use message_builder::{encode_message, query_message};
pub use udp::exchange;
