#![no_main]
use libfuzzer_sys::fuzz_target;
use photoman::*;

fuzz_target!(|data: &[u8]| {
    // Anything we can decode must survive a 24-bit re-encode unchanged
    let limits = Limits::uhd_8k();
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("encode of decoded grid");
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");

    // A second encode is byte-identical
    let again = encode_bmp(&decoded2, enough::Unstoppable).expect("second encode");
    assert_eq!(reencoded, again);
});
