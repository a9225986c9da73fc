#![no_main]
use libfuzzer_sys::fuzz_target;
use tabiya::Engine;

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    let mut output = Vec::new();
    assert!(Engine::new(&mut input, &mut output).run().is_ok() || std::str::from_utf8(data).is_err());
});
