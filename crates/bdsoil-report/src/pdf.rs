//! PDF rendering of a laid-out report.
//!
//! Uses the built-in Helvetica faces, so no font files are needed.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, Pt};
use tracing::info;

use crate::content::{REPORT_TITLE, ReportContent};
use crate::error::ReportError;
use crate::layout::PageLayout;

/// Build the document in memory.
pub fn render_pdf(content: &ReportContent, layout: &PageLayout) -> Result<PdfDocumentReference, ReportError> {
    let pages = layout.paginate(&content.sections());
    let width = Mm::from(Pt(layout.width));
    let height = Mm::from(Pt(layout.height));

    let (doc, first_page, first_layer) = PdfDocument::new(REPORT_TITLE, width, height, "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(|e| ReportError::Pdf(e.to_string()))?;

    let x = Mm::from(Pt(layout.left));
    let mut target = Some((first_page, first_layer));
    for page in &pages {
        let (page_index, layer_index) = match target.take() {
            Some(first) => first,
            None => doc.add_page(width, height, "Layer 1"),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in &page.lines {
            let font = if line.style.is_bold() { &bold } else { &regular };
            layer.use_text(line.text.as_str(), line.style.font_size(), x, Mm::from(Pt(line.y)), font);
        }
    }

    Ok(doc)
}

/// Render the report and save it under `dir`, returning the file path.
pub fn export_pdf(content: &ReportContent, dir: &Path) -> Result<std::path::PathBuf, ReportError> {
    let layout = PageLayout::LETTER;
    let doc = render_pdf(content, &layout)?;

    let path = dir.join(content.file_name("pdf"));
    let file = File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file)).map_err(|e| ReportError::Pdf(e.to_string()))?;

    info!(path = %path.display(), "PDF report written");
    Ok(path)
}
