#![no_main]
use libfuzzer_sys::fuzz_target;
use photoman::{DecodeRequest, Limits, Permissiveness};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::uhd_8k();

    // Header probing must never panic
    let _ = photoman::probe_bmp(data);

    // Unlimited default decode: oversized headers must fail, not abort
    let _ = photoman::decode_bmp(data, enough::Unstoppable);

    // Every policy must reject or decode without panicking
    for permissiveness in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(permissiveness)
            .decode(enough::Unstoppable);
    }
});
