use lopdf::{dictionary, Document, Object, Stream};

use crate::error::ConvertError;

const POINTS_PER_INCH: f64 = 72.0;

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// Checks that the bytes parse as a PDF with at least one page.
pub fn validate(bytes: &[u8]) -> Result<(), ConvertError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ConvertError::PdfProcessing(format!("Failed to load PDF: {}", e)))?;

    if doc.get_pages().is_empty() {
        return Err(ConvertError::PdfProcessing("PDF has no pages".to_string()));
    }

    Ok(())
}

/// Wraps JPEG data into a single-page PDF sized so the image renders at `dpi`.
pub fn wrap_jpeg(jpeg: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>, ConvertError> {
    let dpi = dpi.max(1) as f64;
    let page_width = ((width as f64 / dpi * POINTS_PER_INCH).round() as i64).max(1);
    let page_height = ((height as f64 / dpi * POINTS_PER_INCH).round() as i64).max(1);

    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let resources_id = doc.new_object_id();
    let content_id = doc.new_object_id();
    let page_id = doc.new_object_id();
    let image_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.to_vec(),
    );
    doc.objects.insert(image_id, Object::Stream(image_stream));

    doc.objects.insert(
        resources_id,
        Object::Dictionary(dictionary! {
            "XObject" => dictionary! {
                "Im1" => image_id,
            },
        }),
    );

    // Image fills the whole page
    let content = format!("q\n{} 0 0 {} 0 0 cm\n/Im1 Do\nQ\n", page_width, page_height);
    let content_stream = Stream::new(dictionary! {}, content.into_bytes());
    doc.objects
        .insert(content_id, Object::Stream(content_stream));

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        }),
    );

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ConvertError::PdfProcessing(e.to_string()))?;

    Ok(buffer)
}
