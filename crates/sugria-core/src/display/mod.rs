//! Markdown display wrappers.
//!
//! Domain types implement [`std::fmt::Display`] directly where there is one
//! obvious rendering (step views, admin records). Newtype wrappers cover the
//! contextual cases: a page of a listing, a record review, the outcome of a
//! submission. All output is markdown, rendered by the CLI's terminal
//! renderer.
//!
//! - [`collections`]: listing tables and stored drafts
//! - [`results`]: submission and deletion outcomes
//! - [`status`]: one-line notices
//! - [`step`]: the current wizard step and whole-record reviews
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for admin models and enums

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod step;

pub use collections::{ApplicationTable, Drafts, MemberTable};
pub use datetime::{LocalDateTime, MaybeDateTime};
pub use results::{DeleteResult, SubmitResult};
pub use status::OperationStatus;
pub use step::RecordReview;
