#![no_main]

use libfuzzer_sys::fuzz_target;
use pdflock::i18n::{MessageArgs, render_template};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let template = std::str::from_utf8(data).unwrap_or("");

    let args = MessageArgs::new()
        .file_count(3)
        .mode_label("encrypted")
        .current_path(Path::new(template));

    let rendered = render_template(template, &args);

    // Templates without placeholders pass through untouched
    if !template.contains('{') {
        assert_eq!(rendered, template);
    }
});
