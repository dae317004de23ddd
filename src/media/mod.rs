// Media adapters — external tools the engines use to get text out of
// pixels and frames out of containers.

pub mod ocr;
pub mod video;

pub use ocr::{TesseractExtractor, TextExtractor};
pub use video::{FfmpegDecoder, VideoDecoder, VideoStream};
