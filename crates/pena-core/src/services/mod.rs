//! Application services - the operations exposed to the HTTP layer.

mod posts;

pub use posts::{MAX_WRITE_ATTEMPTS, PostService};
