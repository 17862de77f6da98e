//! Opening compiled PDFs.

use crate::config::PdfConfig;
use crate::utils::exec::Cmd;
use crate::utils::platform::OPENER;
use anyhow::Result;
use std::path::Path;

/// `pdf.viewer` plus the PDF path, or the platform opener.
pub fn viewer_command(config: &PdfConfig, pdf: &Path) -> Cmd {
    if config.viewer.is_empty() {
        Cmd::from_slice(OPENER).arg(pdf)
    } else {
        Cmd::from_slice(&config.viewer).arg(pdf)
    }
}

/// Open `pdf` without waiting for the viewer to exit.
pub fn open_pdf(config: &PdfConfig, pdf: &Path) -> Result<()> {
    viewer_command(config, pdf).spawn_detached()
}
