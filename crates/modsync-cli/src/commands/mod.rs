pub mod common;
pub mod dedupe;
pub mod diff;
pub mod push;
pub mod resolve;
pub mod status;

pub use common::CommandOptions;
pub use dedupe::Dedupe;
pub use diff::Diff;
pub use push::Push;
pub use resolve::Resolve;
pub use status::Status;
