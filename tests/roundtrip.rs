//! Integration tests exercising the public crate API end-to-end, including
//! the PPM collaborator. Unit-level chunk/header/hash checks live alongside
//! the modules they test; this file covers whole-image round trips.

use qoiparser::{decode, encode, ppm_read, ppm_write, DecodeError};

fn checkerboard(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let on = (x + y) % 2 == 0;
            let (r, g, b) = if on { (255, 255, 255) } else { (0, 0, 0) };
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    pixels
}

fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 5) as u8, (y * 5) as u8, ((x + y) * 3) as u8, 255]);
        }
    }
    pixels
}

#[test]
fn round_trip_checkerboard_rgba() {
    let pixels = checkerboard(16, 16);
    let bytes = encode(&pixels, 16, 16, true, false).unwrap();
    let image = decode(&bytes).unwrap();
    assert_eq!(image.width, 16);
    assert_eq!(image.height, 16);
    assert!(image.has_alpha);
    assert!(!image.all_linear);
    assert_eq!(image.pixels, pixels);
}

#[test]
fn round_trip_gradient_rgb_no_alpha() {
    let pixels_rgb: Vec<u8> = (0..32u32)
        .flat_map(|y| (0..32u32).flat_map(move |x| [(x * 7) as u8, (y * 7) as u8, 128]))
        .collect();
    let bytes = encode(&pixels_rgb, 32, 32, false, false).unwrap();
    let image = decode(&bytes).unwrap();
    assert!(!image.has_alpha);

    // Core output is always RGBA; compare against the RGB input with alpha=255 inserted.
    let expected_rgba: Vec<u8> = pixels_rgb
        .chunks_exact(3)
        .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
        .collect();
    assert_eq!(image.pixels, expected_rgba);
}

#[test]
fn round_trip_single_color_image_is_mostly_runs() {
    let pixels: Vec<u8> = std::iter::repeat([7u8, 8, 9, 255])
        .take(200)
        .flatten()
        .collect();
    let bytes = encode(&pixels, 20, 10, true, false).unwrap();
    // One chunk for the first (non-matching-previous) pixel, then
    // ceil(199 / 62) = 4 QOI_OP_RUN chunks covering the remaining repeats:
    // 62 + 62 + 62 + 13 = 199.
    let body_len = bytes.len() - 14 - 8;
    assert!(body_len <= 2 + 4, "expected at most 6 body bytes, got {body_len}");
    let image = decode(&bytes).unwrap();
    assert_eq!(image.pixels, pixels);
}

#[test]
fn round_trip_through_ppm() {
    let pixels = gradient(12, 9);
    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect();

    let ppm_bytes = ppm_write(12, 9, &rgb, false);
    let (width, height, read_back) = ppm_read(&ppm_bytes).unwrap();
    assert_eq!((width, height), (12, 9));

    let qoi_bytes = encode(&read_back, width, height, false, false).unwrap();
    let image = decode(&qoi_bytes).unwrap();

    let round_tripped_ppm = ppm_write(image.width, image.height, &image.pixels, true);
    assert_eq!(round_tripped_ppm, ppm_bytes);
}

#[test]
fn decode_rejects_truncated_stream() {
    let pixels = checkerboard(4, 4);
    let mut bytes = encode(&pixels, 4, 4, true, false).unwrap();
    bytes.truncate(bytes.len() - 10);
    // Cutting bytes off the end always breaks *something*: a chunk operand,
    // the pixel count, or the terminator. Which one depends on where the cut
    // landed, but it must never silently decode.
    assert!(decode(&bytes).is_err());
}

#[test]
fn decode_rejects_corrupted_header() {
    let pixels = checkerboard(4, 4);
    let mut bytes = encode(&pixels, 4, 4, true, false).unwrap();
    bytes[0] = b'x'; // corrupt magic
    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedHeader(_)));
}

#[test]
fn header_metadata_survives_round_trip() {
    let pixels = checkerboard(3, 5);
    for has_alpha in [false, true] {
        for all_linear in [false, true] {
            let input = if has_alpha {
                pixels.clone()
            } else {
                pixels
                    .chunks_exact(4)
                    .flat_map(|p| [p[0], p[1], p[2]])
                    .collect()
            };
            let bytes = encode(&input, 3, 5, has_alpha, all_linear).unwrap();
            let image = decode(&bytes).unwrap();
            assert_eq!(image.width, 3);
            assert_eq!(image.height, 5);
            assert_eq!(image.has_alpha, has_alpha);
            assert_eq!(image.all_linear, all_linear);
        }
    }
}
