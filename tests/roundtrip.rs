use enough::Unstoppable;
use photoman::*;

/// Hand-built BMP: 54-byte headers, `palette` entries (B,G,R,0), then `rows`
/// each padded to `row_stride(width, bpp)`.
fn build_bmp(width: i32, height: i32, bpp: u16, palette: &[[u8; 3]], rows: &[&[u8]]) -> Vec<u8> {
    let stride = bmp::row_stride(width as u32, bpp);
    let data_offset = 54 + palette.len() * 4;
    let image_size = stride * rows.len();
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((data_offset + image_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for &[r, g, b] in palette {
        out.extend_from_slice(&[b, g, r, 0]);
    }
    for row in rows {
        let mut padded = row.to_vec();
        padded.resize(stride, 0);
        out.extend_from_slice(&padded);
    }
    out
}

fn px(r: u8, g: u8, b: u8) -> Pixel {
    Pixel::new(r, g, b)
}

#[test]
fn decode_24bit_2x2() {
    let data = build_bmp(
        2,
        2,
        24,
        &[],
        &[&[0, 0, 255, 0, 255, 0], &[255, 0, 0, 255, 255, 255]],
    );
    assert_eq!(data.len(), 54 + 16);

    let grid = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!((grid.width(), grid.height()), (2, 2));
    assert_eq!(
        grid.pixels(),
        &[
            px(255, 0, 0),
            px(0, 255, 0),
            px(0, 0, 255),
            px(255, 255, 255)
        ]
    );

    // Re-encoding reproduces the reference bytes exactly.
    let encoded = encode_bmp(&grid, Unstoppable).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn encode_header_layout() {
    let grid = PixelGrid::new(3, 2).unwrap();
    let out = encode_bmp(&grid, Unstoppable).unwrap();
    // 3 * 3 = 9 bytes per row, padded to 12.
    assert_eq!(out.len(), 54 + 24);
    assert_eq!(&out[0..2], b"BM");
    assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 78);
    assert_eq!(u32::from_le_bytes(out[10..14].try_into().unwrap()), 54);
    assert_eq!(u32::from_le_bytes(out[14..18].try_into().unwrap()), 40);
    assert_eq!(i32::from_le_bytes(out[18..22].try_into().unwrap()), 3);
    assert_eq!(i32::from_le_bytes(out[22..26].try_into().unwrap()), 2);
    assert_eq!(u16::from_le_bytes(out[26..28].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(out[28..30].try_into().unwrap()), 24);
    assert_eq!(u32::from_le_bytes(out[30..34].try_into().unwrap()), 0);
    assert_eq!(u32::from_le_bytes(out[34..38].try_into().unwrap()), 24);
    assert!(out[38..54].iter().all(|&b| b == 0));
}

#[test]
fn roundtrip_odd_width() {
    let w = 5;
    let h = 3;
    let pixels: Vec<Pixel> = (0..w * h)
        .map(|i| px(i as u8 * 13, 255 - i as u8, i as u8 * 7))
        .collect();
    let grid = PixelGrid::from_pixels(w, h, pixels).unwrap();
    let encoded = encode_bmp(&grid, Unstoppable).unwrap();
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn decode_1bit_single_foreground() {
    let data = build_bmp(8, 1, 1, &[[200, 100, 50]], &[&[0b1011_0010]]);
    let grid = decode_bmp(&data, Unstoppable).unwrap();
    let fg = px(200, 100, 50);
    let bg = px(0, 0, 0);
    // Bits are consumed least significant first.
    assert_eq!(grid.pixels(), &[bg, fg, bg, bg, fg, fg, bg, fg]);
}

#[test]
fn decode_4bit_palette() {
    let mut palette = [[0u8; 3]; 16];
    for (i, entry) in palette.iter_mut().enumerate() {
        *entry = [i as u8 * 16, 0, 255 - i as u8];
    }
    // Low nibble first: indices 1, 2, 15.
    let data = build_bmp(3, 1, 4, &palette, &[&[0x21, 0x0f]]);
    let grid = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(
        grid.pixels(),
        &[px(16, 0, 254), px(32, 0, 253), px(240, 0, 240)]
    );
}

#[test]
fn decode_8bit_palette_rows_in_file_order() {
    let mut palette = vec![[0u8; 3]; 256];
    palette[7] = [1, 2, 3];
    palette[200] = [9, 8, 7];
    let data = build_bmp(2, 2, 8, &palette, &[&[7, 200], &[200, 200]]);
    let grid = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(
        grid.pixels(),
        &[px(1, 2, 3), px(9, 8, 7), px(9, 8, 7), px(9, 8, 7)]
    );
}

#[test]
fn decode_16bit_red_is_zero() {
    // Field 0x1234: blue = 0x34, green = 0x12, no red byte.
    let data = build_bmp(1, 1, 16, &[], &[&[0x34, 0x12]]);
    let grid = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(grid.pixels(), &[px(0, 0x12, 0x34)]);
}

#[test]
fn data_offset_is_honored() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[3, 2, 1]]);
    // Insert 6 junk bytes between the headers and the pixel data.
    let pixels = data.split_off(54);
    data.extend_from_slice(&[0xAA; 6]);
    data.extend_from_slice(&pixels);
    data[10..14].copy_from_slice(&60u32.to_le_bytes());
    let grid = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(grid.pixels(), &[px(1, 2, 3)]);
}

#[test]
fn bad_signature() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[0] = b'X';
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidSignature(_)));
    assert_eq!(err.code(), 2000);
}

#[test]
fn bad_planes() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[26] = 2;
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::TooManyPlanes(2)));
    assert_eq!(err.code(), 2001);
}

#[test]
fn bad_bit_depth() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[28] = 32;
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidBitDepth(32))
    ));
}

#[test]
fn important_colors_above_used() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[50] = 1;
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidColorTable(_)));
    assert_eq!(err.code(), 2002);
}

#[test]
fn wrong_palette_size() {
    // 1-bit images need exactly one entry.
    let data = build_bmp(8, 1, 1, &[[1, 1, 1], [2, 2, 2]], &[&[0xff]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidColorTable(_))
    ));
    // 4-bit images need exactly sixteen.
    let data = build_bmp(2, 1, 4, &[[1, 1, 1]; 4], &[&[0x00]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidColorTable(_))
    ));
}

#[test]
fn compression_rejected() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[30] = 1;
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::UnsupportedCompression(1))
    ));
}

#[test]
fn truncated_header_and_palette() {
    let data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    assert!(matches!(
        decode_bmp(&data[..20], Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
    let data = build_bmp(2, 1, 4, &[[5, 5, 5]; 16], &[&[0x10]]);
    assert!(matches!(
        decode_bmp(&data[..54 + 20], Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn data_offset_past_end() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    data[10..14].copy_from_slice(&1000u32.to_le_bytes());
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::SeekOutOfBounds { offset: 1000, .. }
    ));
    assert_eq!(err.code(), 2);
}

#[test]
fn truncated_rows_policy() {
    let data = build_bmp(
        1,
        3,
        24,
        &[],
        &[&[1, 1, 1], &[2, 2, 2], &[3, 3, 3]],
    );
    // Drop the last row and half of the second. Zero the file size field so
    // strict mode gets as far as the pixel data.
    let mut short = data[..54 + 4 + 2].to_vec();
    short[2..6].copy_from_slice(&0u32.to_le_bytes());

    let grid = decode_bmp(&short, Unstoppable).unwrap();
    assert_eq!(
        grid.pixels(),
        &[px(1, 1, 1), px(0, 0, 0), px(0, 0, 0)]
    );

    let strict = DecodeRequest::new(&short)
        .with_permissiveness(Permissiveness::Strict)
        .decode(Unstoppable);
    assert!(matches!(
        strict,
        Err(BitmapError::Truncated {
            rows_read: 1,
            height: 3
        })
    ));
}

#[test]
fn strict_checks_size_fields() {
    let mut data = build_bmp(1, 1, 24, &[], &[&[0, 0, 0]]);
    assert!(
        DecodeRequest::new(&data)
            .with_permissiveness(Permissiveness::Strict)
            .decode(Unstoppable)
            .is_ok()
    );
    data[2..6].copy_from_slice(&999u32.to_le_bytes());
    assert!(decode_bmp(&data, Unstoppable).is_ok());
    assert!(matches!(
        DecodeRequest::new(&data)
            .with_permissiveness(Permissiveness::Strict)
            .decode(Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn permissive_short_palette() {
    let data = build_bmp(2, 1, 8, &[[10, 20, 30], [40, 50, 60]], &[&[1, 9]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidColorTable(_))
    ));
    let grid = DecodeRequest::new(&data)
        .with_permissiveness(Permissiveness::Permissive)
        .decode(Unstoppable)
        .unwrap();
    // Index 9 is past the two-entry palette and decodes as black.
    assert_eq!(grid.pixels(), &[px(40, 50, 60), px(0, 0, 0)]);
}

#[test]
fn probe_reports_header() {
    let data = build_bmp(8, 2, 1, &[[1, 2, 3]], &[&[0], &[0]]);
    let info = probe_bmp(&data).unwrap();
    assert_eq!(
        info,
        BmpInfo {
            width: 8,
            height: 2,
            bits_per_pixel: 1,
            palette_len: 1,
            data_offset: 58,
            row_stride: 4,
        }
    );
}

#[test]
fn limits_reject_large() {
    let row: &[u8] = &[0; 12];
    let data = build_bmp(4, 4, 24, &[], &[row; 4]);
    let limits = Limits {
        max_pixels: Some(8),
        ..Default::default()
    };
    let result = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        BitmapError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert!(DecodeRequest::new(&data).with_limits(&limits).probe().is_err());
}

#[test]
fn oversized_header_without_limits_is_an_error() {
    // Headers alone, no pixel data: the grid allocation itself must fail cleanly.
    for bpp in [1u16, 8, 24] {
        let palette: Vec<[u8; 3]> = match bpp {
            1 => vec![[255, 255, 255]],
            8 => vec![[0, 0, 0]; 256],
            _ => Vec::new(),
        };
        let data = build_bmp(i32::MAX, i32::MAX, bpp, &palette, &[]);

        let info = probe_bmp(&data).unwrap();
        assert_eq!((info.width, info.height), (i32::MAX as u32, i32::MAX as u32));

        for permissiveness in [Permissiveness::Standard, Permissiveness::Strict] {
            let result = DecodeRequest::new(&data)
                .with_permissiveness(permissiveness)
                .decode(Unstoppable);
            assert!(
                matches!(
                    result,
                    Err(BitmapError::DimensionsTooLarge { .. } | BitmapError::LimitExceeded(_))
                ),
                "{bpp} bpp {permissiveness:?}: {result:?}"
            );
        }
        assert_eq!(decode_bmp(&data, Unstoppable).unwrap_err().code(), 1);
    }
}

#[test]
fn negative_height_rejected() {
    let data = build_bmp(1, -1, 24, &[], &[&[0, 0, 0]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidDimensions { .. })
    ));
}

#[cfg(feature = "std")]
#[test]
fn std_io_roundtrip() {
    let grid = PixelGrid::from_pixels(2, 1, vec![px(1, 2, 3), px(4, 5, 6)]).unwrap();
    let mut buf = Vec::new();
    encode_bmp_to(&grid, &mut buf, Unstoppable).unwrap();
    let decoded = decode_bmp_from(std::io::Cursor::new(buf), Unstoppable).unwrap();
    assert_eq!(decoded, grid);
}
