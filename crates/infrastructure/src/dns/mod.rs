pub mod handler;
pub mod matcher;
pub mod reply;

pub use handler::{FnHandler, ZoneHandler};
pub use matcher::{type_matches, SPF};
pub use reply::{send_reply, Reply};
