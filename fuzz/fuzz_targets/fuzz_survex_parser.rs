#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(survey) = cave_survey::io::survex::parse_survex("fuzz", text) {
            // Export darf nach erfolgreichem Import nicht fehlschlagen
            let _ = cave_survey::io::survex::write_survex(&survey);
        }
    }
});
