#[cfg(test)]
mod tests {
    use image::ImageFormat;

    use crate::steganalysis::sample::image_crate_reader::is_indexed;
    use crate::steganalysis::sample::ColorMode;

    /// Signature, IHDR length and tag, 16x16, bit depth 8, then `color_type`.
    fn png_header(color_type: u8) -> Vec<u8> {
        let mut header = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        header.extend_from_slice(&16u32.to_be_bytes());
        header.extend_from_slice(&16u32.to_be_bytes());
        header.extend_from_slice(&[8, color_type, 0, 0, 0]);
        header
    }

    /// File header plus a BITMAPINFOHEADER start with the given bit count.
    fn bmp_header(bit_count: u16) -> Vec<u8> {
        let mut header = b"BM".to_vec();
        header.extend_from_slice(&[0; 12]);
        header.extend_from_slice(&40u32.to_le_bytes());
        header.extend_from_slice(&16i32.to_le_bytes());
        header.extend_from_slice(&16i32.to_le_bytes());
        header.extend_from_slice(&1u16.to_le_bytes());
        header.extend_from_slice(&bit_count.to_le_bytes());
        header
    }

    #[test]
    fn test_png_color_type_decides_indexed() {
        assert!(is_indexed(Some(ImageFormat::Png), &png_header(3)));
        assert!(!is_indexed(Some(ImageFormat::Png), &png_header(2)));
        assert!(!is_indexed(Some(ImageFormat::Png), &png_header(6)));
        assert!(!is_indexed(Some(ImageFormat::Png), &png_header(0)));
    }

    #[test]
    fn test_bmp_bit_count_decides_indexed() {
        assert!(is_indexed(Some(ImageFormat::Bmp), &bmp_header(8)));
        assert!(is_indexed(Some(ImageFormat::Bmp), &bmp_header(4)));
        assert!(is_indexed(Some(ImageFormat::Bmp), &bmp_header(1)));
        assert!(!is_indexed(Some(ImageFormat::Bmp), &bmp_header(24)));
        assert!(!is_indexed(Some(ImageFormat::Bmp), &bmp_header(32)));
    }

    #[test]
    fn test_gif_is_always_indexed() {
        assert!(is_indexed(Some(ImageFormat::Gif), b"GIF89a"));
        assert!(!is_indexed(Some(ImageFormat::Jpeg), b"\xff\xd8\xff"));
        assert!(!is_indexed(None, &[]));
    }

    #[test]
    fn test_truncated_headers_are_not_indexed() {
        assert!(!is_indexed(Some(ImageFormat::Png), b"\x89PNG"));
        assert!(!is_indexed(Some(ImageFormat::Bmp), b"BM"));
    }

    #[test]
    fn test_palette_mode_skips_heuristics() {
        assert_eq!(ColorMode::Palette.as_str(), "P");
        assert_eq!(ColorMode::Palette.channel_count(), 1);
        assert!(!ColorMode::Palette.is_multi_channel());
    }
}
