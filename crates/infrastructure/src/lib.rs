//! dnstest: an in-process DNS server for tests.
//!
//! Describe a few records as zone text, start a server on an ephemeral
//! loopback UDP port, and point real DNS client code at [`Server::addr`].
//!
//! ```no_run
//! use dnstest::client::{exchange, query_message};
//! use dnstest::Server;
//! use dnstest::proto::rr::RecordType;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), dnstest::FixtureError> {
//! let server = Server::bind(
//!     "example.com. 104 A 127.0.0.1\nexample.com. 104 MX 10 mail.example.com.",
//! )
//! .await?;
//!
//! let query = query_message("example.com.", RecordType::A)?;
//! let response = exchange(server.addr(), &query, Duration::from_secs(2)).await?;
//! for record in response.answers() {
//!     println!("{}", record); // example.com. 104 IN A 127.0.0.1
//! }
//!
//! server.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Matching is intentionally simple: exact name equality (case-insensitive),
//! an `ANY` wildcard, and exact type equality for A, AAAA, MX, TXT, SPF, NS,
//! SRV, SOA and CNAME. Other query types get an empty answer. A request
//! without exactly one question gets `FORMERR`.

pub mod client;
pub mod dns;
pub mod server;
pub mod zone;

pub use dns::{FnHandler, Reply, ZoneHandler};
pub use dnstest_domain::FixtureError;
pub use hickory_proto as proto;
pub use server::{Server, UnstartedServer};
pub use zone::ZoneRecords;
