//! The platform lifecycle contract and its engine-backed implementation.
//!
//! The harness drives a benchmark run through a strict call sequence:
//!
//! ```text
//! verify_setup -> load_graph -> prepare -> startup -> run -> finalize -> terminate
//!                      \
//!                       `-> delete_graph (dataset cleanup, after load)
//! ```
//!
//! Out-of-order calls are a harness bug; the adapter does not police the
//! ordering beyond not crashing.

pub mod driver;
pub mod trait_def;

pub use driver::{HeronPlatform, PLATFORM_NAME};
pub use trait_def::Platform;
