#![no_main]

use libfuzzer_sys::fuzz_target;
use pdftoolkit::config::OutputPattern;

fuzz_target!(|data: &[u8]| {
    let Ok(template) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(pattern) = OutputPattern::parse(template) {
        let first = pattern.render("doc", 1);
        let second = pattern.render("doc", 2);
        assert!(!first.contains('/') && !first.contains('\\'));
        if pattern.has_sequence() {
            assert_ne!(first, second);
        } else {
            assert_eq!(first, second);
        }
    }
});
