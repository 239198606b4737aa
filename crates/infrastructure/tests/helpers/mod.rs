#![allow(dead_code)]
pub mod builders;
pub mod raw_peer;

#[allow(unused_imports)]
pub use builders::{
    a_record, ask, request_with_questions, send_request, EXAMPLE_ZONE, TIMEOUT,
};
#[allow(unused_imports)]
pub use raw_peer::{Behaviour, RawPeer};
