#![no_main]

use libfuzzer_sys::fuzz_target;
use pdflock::i18n::{Catalog, MessageArgs, MessageKey};

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");

    // Malformed input must be an error, never a panic
    if let Ok(catalog) = Catalog::from_json(s) {
        for key in MessageKey::ALL {
            let _ = catalog.render(key, &MessageArgs::new().file_count(1));
        }
    }
});
