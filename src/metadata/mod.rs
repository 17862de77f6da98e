//! Note metadata extraction.
//!
//! ```text
//! MetadataQuery ──typst query──► raw output
//!      │
//!      ├─ scan    find the `[{"func"...]` region
//!      ├─ decode  strict, then lenient JSON
//!      └─ record  first `value` object + defaults ──► MetadataRecord
//! ```

mod decode;
mod query;
mod record;
mod scan;

pub use decode::{Decoder, DecoderChain, LenientJson, StrictJson};
pub use query::{MetadataError, MetadataQuery};
pub use record::{DEFAULT_STATUS, DEFAULT_TYPE, Fallback, MetadataRecord};
pub use scan::find_json_region;
