//! Session domain module.
//!
//! # Module Structure
//!
//! - `policy`: which of the two session models is active (`SessionPolicy`)
//! - `reference`: the identifiers questions are scoped to (`SessionReference`, `SessionUpdate`)
//! - `registry`: holder of those identifiers (`SessionRegistry`)

mod policy;
mod reference;
mod registry;

pub use policy::SessionPolicy;
pub use reference::{SessionReference, SessionUpdate};
pub use registry::SessionRegistry;
