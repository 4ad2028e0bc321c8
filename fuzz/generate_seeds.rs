#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bpp: u16, width: i32, height: i32, palette: &[[u8; 4]], data_len: usize) -> Vec<u8> {
    let offset = 54 + palette.len() * 4;
    let mut bmp = Vec::with_capacity(offset + data_len);
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&((offset + data_len) as u32).to_le_bytes()); // file size
    bmp.extend_from_slice(&0u32.to_le_bytes()); // reserved
    bmp.extend_from_slice(&(offset as u32).to_le_bytes()); // data offset
    bmp.extend_from_slice(&40u32.to_le_bytes()); // info header size
    bmp.extend_from_slice(&width.to_le_bytes());
    bmp.extend_from_slice(&height.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes()); // planes
    bmp.extend_from_slice(&bpp.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes()); // compression
    bmp.extend_from_slice(&(data_len as u32).to_le_bytes()); // image size
    bmp.extend_from_slice(&[0; 8]); // resolution
    bmp.extend_from_slice(&(palette.len() as u32).to_le_bytes()); // colors used
    bmp.extend_from_slice(&0u32.to_le_bytes()); // important colors
    for entry in palette {
        bmp.extend_from_slice(entry);
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1
    let mut bmp = header(24, 1, 1, &[], 4);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    // 24-bit 2x2
    let mut bmp = header(24, 2, 2, &[], 16);
    bmp.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0]);
    fs::write(format!("{dir}/bmp24_2x2.bmp"), bmp).unwrap();

    // 1-bit 8x1, single foreground color
    let mut bmp = header(1, 8, 1, &[[0, 0, 255, 0]], 4);
    bmp.extend_from_slice(&[0b1011_0010, 0, 0, 0]);
    fs::write(format!("{dir}/bmp1_8x1.bmp"), bmp).unwrap();

    // 4-bit 4x1
    let palette: Vec<[u8; 4]> = (0..16u8).map(|i| [i * 16, 255 - i * 16, i, 0]).collect();
    let mut bmp = header(4, 4, 1, &palette, 4);
    bmp.extend_from_slice(&[0x21, 0x43, 0, 0]);
    fs::write(format!("{dir}/bmp4_4x1.bmp"), bmp).unwrap();

    // 8-bit 3x2
    let palette: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    let mut bmp = header(8, 3, 2, &palette, 8);
    bmp.extend_from_slice(&[0, 128, 255, 0, 64, 32, 16, 0]);
    fs::write(format!("{dir}/bmp8_3x2.bmp"), bmp).unwrap();

    // 16-bit 2x1
    let mut bmp = header(16, 2, 1, &[], 4);
    bmp.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    fs::write(format!("{dir}/bmp16_2x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut rows_missing = header(24, 4, 4, &[], 64);
    rows_missing.extend_from_slice(&[0x55; 20]);
    fs::write(format!("{dir}/bmp24_truncated.bmp"), rows_missing).unwrap();

    println!("Generated seed corpus in {dir}/");
}
