#![no_main]
use inidoc::{Document, LineTerminator, Options};
use libfuzzer_sys::fuzz_target;

// Parsing the rendered text of a parsed document yields the same records
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let doc = Document::parse(&text, Options::default());

    let rendered = doc.to_text(LineTerminator::Lf);
    let reread = Document::parse(&rendered, Options::default());

    assert_eq!(doc.records(), reread.records());
});
