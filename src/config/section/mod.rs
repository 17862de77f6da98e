//! Configuration section definitions.
//!
//! Each module corresponds to a section in `typnote.toml`:
//!
//! | Module      | TOML Section   | Purpose                              |
//! |-------------|----------------|--------------------------------------|
//! | `notes`     | `[notes]`      | Notes directory and filename pattern |
//! | `templates` | `[templates]`  | Template directory and default       |
//! | `typst`     | `[typst]`      | typst binary, root, fonts            |
//! | `pdf`       | `[pdf]`        | PDF output directory and viewer      |

mod notes;
mod pdf;
mod templates;
mod typst;

pub use notes::{NotesConfig, SlugSeparator};
pub use pdf::PdfConfig;
pub use templates::TemplatesConfig;
pub use typst::TypstConfig;
