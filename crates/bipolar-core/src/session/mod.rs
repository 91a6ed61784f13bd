//! Session discovery module
//!
//! FlowSync writes each training session as a group of files sharing the
//! first six `-` delimited components of their names, e.g.
//!
//! ```text
//! v2-users-0000001-training-sessions-1234567-create
//! v2-users-0000001-training-sessions-1234567-exercises-1-samples
//! v2-users-0000001-training-sessions-1234567-exercises-1-route
//! ```
//!
//! Discovery reduces a directory listing to one [`SessionKey`] per group.
//!
//! # Example
//!
//! ```ignore
//! use bipolar_core::session::SessionGrouper;
//!
//! let grouper = SessionGrouper::new(&fs, &sink);
//! for key in grouper.discover(&export_dir) {
//!     println!("{}", key);
//! }
//! ```
//!
//! [`SessionKey`]: crate::types::SessionKey

mod classifier;
mod grouper;

pub use classifier::{classify, classify_detailed, Rejection, EXPORT_PREFIX, KEY_COMPONENTS};
pub use grouper::SessionGrouper;
