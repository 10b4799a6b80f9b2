//! Image decoding and PNG encoding.
//!
//! The source format is sniffed from the bytes, never taken from the file
//! extension. HEIF content needs the `heif` feature; everything else goes
//! through the `image` crate.

use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::domain::{AppError, Result};

/// ISO-BMFF major brands identifying HEIF/HEIC still images.
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

/// Returns true if `bytes` start with an ISO-BMFF `ftyp` box of a HEIF brand.
#[must_use]
pub fn is_heif(bytes: &[u8]) -> bool {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return false;
    }
    HEIF_BRANDS.iter().any(|brand| &bytes[8..12] == *brand)
}

/// Decodes an image, detecting the format from its content.
///
/// `path` is used for error messages only.
///
/// # Errors
/// Returns a codec error if the bytes are not a supported image.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<DynamicImage> {
    if is_heif(bytes) {
        return decode_heif(path, bytes);
    }

    image::load_from_memory(bytes).map_err(|e| AppError::codec(path, e))
}

/// Writes `image` as a PNG file at `dest`, replacing any existing file.
///
/// # Errors
/// Returns a codec error if encoding or writing fails.
pub fn save_png(image: &DynamicImage, dest: &Path) -> Result<()> {
    image
        .save_with_format(dest, ImageFormat::Png)
        .map_err(|e| AppError::codec(dest, e))
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path, bytes: &[u8]) -> Result<DynamicImage> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let heif_error = |e: libheif_rs::HeifError| AppError::Codec {
        path: path.to_path_buf(),
        message: format!("HEIF decode failed: {e}"),
        source: None,
    };

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes).map_err(heif_error)?;
    let handle = ctx.primary_image_handle().map_err(heif_error)?;
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgba), None)
        .map_err(heif_error)?;

    let planes = decoded.planes();
    let plane = planes.interleaved.ok_or_else(|| AppError::Codec {
        path: path.to_path_buf(),
        message: "HEIF image has no interleaved RGBA plane".into(),
        source: None,
    })?;

    // Rows may be padded; copy only the visible pixels.
    let row_len = plane.width as usize * 4;
    let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
    for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }

    image::RgbaImage::from_raw(plane.width, plane.height, pixels)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| AppError::Codec {
            path: path.to_path_buf(),
            message: "HEIF pixel buffer does not match image size".into(),
            source: None,
        })
}

#[cfg(not(feature = "heif"))]
fn decode_heif(path: &Path, _bytes: &[u8]) -> Result<DynamicImage> {
    Err(AppError::Codec {
        path: path.to_path_buf(),
        message: "HEIF content requires building with the `heif` or `heif-embedded` feature"
            .into(),
        source: None,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;
    use image::GenericImageView;
    use tempfile::tempdir;

    fn heif_header(brand: &[u8; 4]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0, 24];
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(brand);
        bytes.extend_from_slice(&[0; 12]);
        bytes
    }

    #[test]
    fn test_detects_heif_brands() {
        assert!(is_heif(&heif_header(b"heic")));
        assert!(is_heif(&heif_header(b"mif1")));
        assert!(!is_heif(&heif_header(b"isom")));
        assert!(!is_heif(&png_bytes(2, 2)));
        assert!(!is_heif(b"ftyp"));
    }

    #[test]
    fn test_decode_sniffs_content_not_extension() {
        let img = decode(Path::new("photo.heic"), &png_bytes(4, 3)).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[test]
    fn test_decode_garbage_is_codec_error() {
        let err = decode(Path::new("bad.heic"), b"not an image").unwrap_err();
        assert!(matches!(err, AppError::Codec { .. }));
        assert!(err.to_string().contains("bad.heic"));
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn test_heif_without_feature_is_codec_error() {
        let err = decode(Path::new("real.heic"), &heif_header(b"heic")).unwrap_err();
        assert!(err.to_string().contains("heif"));
    }

    #[cfg(feature = "heif")]
    #[test]
    fn test_decodes_real_heic() {
        use super::test_support::SAMPLE_HEIC;

        assert!(is_heif(SAMPLE_HEIC));
        let img = decode(Path::new("sample.heic"), SAMPLE_HEIC).unwrap();
        let (width, height) = img.dimensions();
        assert!(width > 0 && height > 0);

        let dir = tempdir().unwrap();
        let dest = dir.path().join("sample.png");
        save_png(&img, &dest).unwrap();
        let png = image::open(&dest).unwrap();
        assert_eq!(png.dimensions(), (width, height));
    }

    #[test]
    fn test_save_png_writes_png() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.png");
        let img = decode(Path::new("in.heic"), &png_bytes(2, 2)).unwrap();

        save_png(&img, &dest).unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }
}
