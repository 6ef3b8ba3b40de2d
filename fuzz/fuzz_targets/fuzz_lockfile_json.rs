#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    // Any artifact that sanitizes once must sanitize to the same bytes again
    if let Ok(once) = rigger::application::sanitize_lockfile(content) {
        let twice = rigger::application::sanitize_lockfile(&once)
            .expect("sanitized output must parse");
        assert_eq!(once, twice);
    }
});
