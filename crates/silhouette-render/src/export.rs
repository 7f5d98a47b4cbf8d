//! Paginated lookbook export, one silhouette per A4 page.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::errors::ExportError;
use crate::render::RenderedSilhouette;
use crate::svg::escape_xml;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const PAGE_MARGIN_MM: f64 = 20.0;
/// Vertical band reserved for the page title.
pub const TITLE_BAND_MM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where a silhouette lands on its page, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlacement {
    pub page: usize,
    pub title: String,
    pub title_y: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fit an artifact of the given aspect into the printable area of a page,
/// centred horizontally and within the band below the title.
pub fn place_on_page(index: usize, artifact_width: f64, artifact_height: f64) -> PagePlacement {
    let available_width = PAGE_WIDTH_MM - 2.0 * PAGE_MARGIN_MM;
    let available_height = PAGE_HEIGHT_MM - 2.0 * PAGE_MARGIN_MM - TITLE_BAND_MM;
    let ratio = artifact_height / artifact_width;

    let mut width = available_width;
    let mut height = width * ratio;
    if height > available_height {
        height = available_height;
        width = height / ratio;
    }

    PagePlacement {
        page: index + 1,
        title: format!("Silhouette {}", index + 1),
        title_y: PAGE_MARGIN_MM,
        x: (PAGE_WIDTH_MM - width) / 2.0,
        y: PAGE_MARGIN_MM + 8.0 + (available_height - height) / 2.0,
        width,
        height,
    }
}

/// A backend that turns rendered silhouettes into a downloadable document.
pub trait LookbookExporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, silhouettes: &[RenderedSilhouette]) -> Result<Vec<u8>, ExportError>;
}

/// Print-ready HTML: one A4 section per silhouette with inline SVG.
#[derive(Debug, Clone)]
pub struct HtmlLookbook {
    pub title: String,
}

impl Default for HtmlLookbook {
    fn default() -> Self {
        Self {
            title: "Silhouette lookbook".to_string(),
        }
    }
}

impl LookbookExporter for HtmlLookbook {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn export(&self, silhouettes: &[RenderedSilhouette]) -> Result<Vec<u8>, ExportError> {
        if silhouettes.is_empty() {
            return Err(ExportError::EmptyExportTarget);
        }

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_xml(&self.title)));
        html.push_str(&format!(
            "<style>\n@page {{ size: A4 portrait; margin: 0; }}\nbody {{ margin: 0; background: #0a0a15; }}\n.page {{ position: relative; width: {PAGE_WIDTH_MM}mm; height: {PAGE_HEIGHT_MM}mm; page-break-after: always; overflow: hidden; background: #ffffff; }}\n.page h2 {{ position: absolute; left: 0; width: 100%; margin: 0; text-align: center; font: 16pt Georgia, serif; }}\n.page .artifact {{ position: absolute; }}\n.page .artifact svg {{ width: 100%; height: 100%; }}\n.page .caption {{ position: absolute; left: 0; width: 100%; text-align: center; font: 9pt monospace; }}\n</style>\n"
        ));
        html.push_str("</head>\n<body>\n");

        for silhouette in silhouettes {
            let placement =
                place_on_page(silhouette.index, silhouette.scene.width, silhouette.scene.height);
            html.push_str(&format!(
                "<section class=\"page\" data-page=\"{}\">\n",
                placement.page
            ));
            html.push_str(&format!(
                "<h2 style=\"top: {:.2}mm\">{}</h2>\n",
                placement.title_y,
                escape_xml(&placement.title)
            ));
            html.push_str(&format!(
                "<div class=\"artifact\" style=\"left: {:.2}mm; top: {:.2}mm; width: {:.2}mm; height: {:.2}mm\">{}</div>\n",
                placement.x,
                placement.y,
                placement.width,
                placement.height,
                silhouette.to_inline_svg()
            ));
            html.push_str(&format!(
                "<p class=\"caption\" style=\"top: {:.2}mm\">{}</p>\n",
                placement.y + placement.height + 2.0,
                escape_xml(&silhouette.description)
            ));
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        info!(
            format = %self.format(),
            pages = silhouettes.len(),
            bytes = html.len(),
            "lookbook exported"
        );
        Ok(html.into_bytes())
    }
}

/// Exporter for `format`; PDF needs a backend this build does not ship.
pub fn exporter_for(format: ExportFormat) -> Result<Box<dyn LookbookExporter>, ExportError> {
    match format {
        ExportFormat::Html => Ok(Box::new(HtmlLookbook::default())),
        ExportFormat::Pdf => Err(ExportError::ExportUnavailable(
            "no pdf backend is compiled in; use --export html and print to PDF".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_artifacts_are_limited_by_height() {
        let placement = place_on_page(0, 300.0, 600.0);
        assert_eq!(placement.page, 1);
        assert_eq!(placement.title, "Silhouette 1");
        assert!((placement.height - 247.0).abs() < 1e-9);
        assert!((placement.width - 123.5).abs() < 1e-9);
        assert!((placement.x - 43.25).abs() < 1e-9);
        assert!((placement.y - 28.0).abs() < 1e-9);
    }

    #[test]
    fn wide_artifacts_are_limited_by_width() {
        let placement = place_on_page(4, 400.0, 100.0);
        assert_eq!(placement.page, 5);
        assert!((placement.width - 170.0).abs() < 1e-9);
        assert!((placement.height - 42.5).abs() < 1e-9);
        assert!((placement.x - PAGE_MARGIN_MM).abs() < 1e-9);
    }

    #[test]
    fn formats_name_their_extension() {
        assert_eq!(ExportFormat::Html.to_string(), "html");
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    }

    #[test]
    fn pdf_backend_is_unavailable() {
        assert!(matches!(
            exporter_for(ExportFormat::Pdf),
            Err(ExportError::ExportUnavailable(_))
        ));
    }
}
