#![no_main]
use inidoc::{classify, LineKind};
use libfuzzer_sys::fuzz_target;

// Any line classifies without panicking and the value span stays on the value
fuzz_target!(|line: &str| {
    let record = classify(line, None);
    assert_eq!(record.verbatim, line);

    if record.kind == LineKind::KeyValue {
        assert!(!record.key.is_empty());
        assert_eq!(&record.verbatim[record.value_span.clone()], record.value);
    }
});
