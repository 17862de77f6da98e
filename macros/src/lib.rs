//! Proc macros for typnote.
//!
//! # Config derive macro
//!
//! Generates field path accessors for diagnostics and a commented TOML
//! template for `typnote init`.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "notes")]
//! /// Where notes live and how they are named.
//! pub struct NotesConfig {
//!     /// Directory holding notes.
//!     pub dir: PathBuf,
//!
//!     /// Filename pattern.
//!     #[config(inline_doc = "placeholders: {date} {slug} {title} {type}")]
//!     pub filename: String,
//!
//!     /// Resolved at load time.
//!     #[config(skip)]
//!     pub resolved: PathBuf,
//! }
//!
//! // Generates:
//! // - NotesConfig::FIELDS.dir -> FieldPath("notes.dir")
//! // - NotesConfig::template() -> TOML body with comments
//! // - NotesConfig::template_with_header() -> with [notes] header
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path
//!
//! Field-level:
//! - `#[config(skip)]` - Skip from FIELDS and template (internal use)
//! - `#[config(hidden)]` - Keep in FIELDS, hide from template output
//! - `#[config(name = "x")]` - Custom TOML field name
//! - `#[config(default = "x")]` - Default value shown in template
//! - `#[config(inline_doc = "x")]` - Trailing `# x` comment in template
//!
//! Without `section`, the section is inferred from the struct name:
//! `NotesConfig` → `notes`, `PdfViewerConfig` → `pdf_viewer`.

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
