//! Seed configuration documents.
//!
//! A configuration document carries everything a [`SeedConfiguration`]
//! holds except functions: dynamic data names a generator from the
//! [generator registry](crate::registry) instead of embedding one, and
//! dependent callbacks cannot be expressed at all.
//!
//! ```json
//! {
//!   "environments": ["development"],
//!   "resetCollection": false,
//!   "seedIfExistingData": false,
//!   "data": {
//!     "static": [{ "title": "Document #1" }],
//!     "dynamic": { "count": 10, "seed": "docs.Document" }
//!   }
//! }
//! ```
//!
//! [`SeedConfiguration`]: crate::SeedConfiguration

mod format;
mod parser;

pub use format::FixtureFormat;
pub use parser::FixtureParser;
