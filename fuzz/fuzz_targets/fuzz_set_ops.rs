#![no_main]
use inidoc::{Document, Options};
use libfuzzer_sys::{fuzz_target, arbitrary::{Arbitrary, Unstructured}};

#[derive(Debug, Arbitrary)]
struct SetOp {
    section: String,
    key: String,
    value: String,
}

// Random edits on a random document never break lookups of what was written
fuzz_target!(|input: &[u8]| {
    let mut u = Unstructured::new(input);

    let text: String = match u.arbitrary() {
        Ok(text) => text,
        Err(_) => return,
    };
    let ops: Vec<SetOp> = match u.arbitrary() {
        Ok(ops) => ops,
        Err(_) => return,
    };

    let mut doc = Document::parse(&text, Options::default());

    for op in ops.iter().take(32) {
        if doc.set(&op.section, &op.key, op.value.as_str()).is_mutation() {
            let stored = doc.get(&op.section, &op.key);
            assert_eq!(stored.render(false), inidoc::Value::from(op.value.as_str()).render(false));
        }
    }
});
