#![no_main]

use libfuzzer_sys::fuzz_target;
use rigger::infrastructure::process::ControlMessage;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        // Decoding never panics, and decoded messages survive re-encoding
        if let Some(message) = ControlMessage::decode(line) {
            assert_eq!(ControlMessage::decode(&message.encode()), Some(message));
        }
    }
});
