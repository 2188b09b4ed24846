//! Encoding of the captured canvas to PNG, JPEG, or PDF, selected by the
//! destination file's extension.

use std::io::Cursor;
use std::path::Path;

use image::ImageEncoder;

use crate::error::Error;
use crate::surface::BACKGROUND;

const JPEG_QUALITY: u8 = 85;
const PDF_DPI: f32 = 96.0;

/// Output encoding, chosen purely by the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless RGBA raster. Also the fallback for unknown extensions.
    Png,
    /// Lossy RGB raster.
    Jpeg,
    /// Single page with an embedded RGB raster.
    Pdf,
}

impl ExportFormat {
    /// Extension match is case-insensitive; anything unrecognized (or a
    /// missing extension) falls through to PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("jpg") => Self::Jpeg,
            _ => Self::Png,
        }
    }
}

/// Encode a captured canvas region.
pub fn encode(capture: &egui::ColorImage, format: ExportFormat) -> Result<Vec<u8>, Error> {
    match format {
        ExportFormat::Png => encode_png(capture),
        ExportFormat::Jpeg => encode_jpeg(capture),
        ExportFormat::Pdf => encode_pdf(capture),
    }
}

/// Encode and write a captured canvas region to `path`, choosing the format
/// from the path's extension.
pub fn write(capture: &egui::ColorImage, path: &Path) -> Result<(), Error> {
    let format = ExportFormat::from_path(path);
    let bytes = encode(capture, format)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "exported {}x{} canvas as {format:?} to {}",
        capture.size[0],
        capture.size[1],
        path.display()
    );
    Ok(())
}

fn encode_png(capture: &egui::ColorImage) -> Result<Vec<u8>, Error> {
    let mut buf = Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf).write_image(
        capture.as_raw(),
        capture.size[0] as u32,
        capture.size[1] as u32,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf.into_inner())
}

fn encode_jpeg(capture: &egui::ColorImage) -> Result<Vec<u8>, Error> {
    let rgb = rgb_pixels(capture);
    let mut buf = Cursor::new(Vec::new());
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).write_image(
        &rgb,
        capture.size[0] as u32,
        capture.size[1] as u32,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(buf.into_inner())
}

/// Embed the capture as a single raster page, sized so the pixels come out
/// at [`PDF_DPI`].
fn encode_pdf(capture: &egui::ColorImage) -> Result<Vec<u8>, Error> {
    let (width, height) = (capture.size[0] as f32, capture.size[1] as f32);
    let page_width_mm = width / PDF_DPI * 25.4;
    let page_height_mm = height / PDF_DPI * 25.4;

    let (doc, page, layer) = printpdf::PdfDocument::new(
        "Whiteboard",
        printpdf::Mm(page_width_mm),
        printpdf::Mm(page_height_mm),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    // Go through printpdf's bundled image crate so the decoded buffer matches
    // what its embedding code expects.
    let png = encode_png(capture)?;
    let decoded = printpdf::image_crate::load_from_memory(&png)
        .map_err(|err| Error::Pdf(err.to_string()))?;
    let rgb = printpdf::image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());

    let transform = printpdf::ImageTransform {
        translate_x: Some(printpdf::Mm(0.0)),
        translate_y: Some(printpdf::Mm(0.0)),
        dpi: Some(PDF_DPI),
        ..Default::default()
    };
    printpdf::Image::from_dynamic_image(&rgb).add_to_layer(layer, transform);

    doc.save_to_bytes().map_err(|err| Error::Pdf(err.to_string()))
}

/// Flatten RGBA pixels over the surface background for the lossy formats.
/// `Color32` is premultiplied, so the source channels are added as-is.
fn rgb_pixels(capture: &egui::ColorImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(capture.pixels.len() * 3);
    for pixel in &capture.pixels {
        let inv = 1.0 - pixel.a() as f32 / 255.0;
        for (channel, bg) in [
            (pixel.r(), BACKGROUND.r()),
            (pixel.g(), BACKGROUND.g()),
            (pixel.b(), BACKGROUND.b()),
        ] {
            rgb.push((channel as f32 + bg as f32 * inv).min(255.0) as u8);
        }
    }
    rgb
}
