// Image extraction and conversion
//
// Images referenced by `draw:image` nodes are pulled out of the package (or
// decoded from inline base64), deduplicated, and optionally converted into a
// format the caller accepts.
//
// # Architecture
//
// - `converter`: extraction, recycling and the `GraphicConverter` capability
// - `graphics`: the extracted image record
// - `options`: accepted formats, conversion targets and naming
// - `raster`: raster re-encoding with the `image` crate (feature `imgconv`)
// - `svm`: PostScript recovery from StarView metafiles
//
// # Example
//
// ```no_run
// use litchi_odf::images::{ImageConverter, ImageOptions};
// use litchi_odf::odf::OdfDocument;
//
// let mut doc = OdfDocument::open("report.odt")?;
// let mut converter = ImageConverter::new(ImageOptions::default());
// let (content, embedded) = doc.content_and_embedded_mut();
// if let Some(frame) = content.child_elements_mut().find(|e| e.is("draw:frame")) {
//     if let Some(image) = converter.extract_frame(frame, embedded) {
//         println!("{} ({})", image.file_name(), image.mime_type());
//     }
// }
// # Ok::<(), litchi_odf::common::Error>(())
// ```
pub mod converter;
pub mod graphics;
pub mod options;
#[cfg(feature = "imgconv")]
pub mod raster;
pub mod svm;

pub use converter::{GraphicConverter, ImageConverter};
pub use graphics::{BinaryGraphics, Payload};
pub use options::ImageOptions;
#[cfg(feature = "imgconv")]
pub use raster::RasterConverter;
