#![no_main]

use libfuzzer_sys::fuzz_target;
use pdftoolkit::plan::PageIndexSet;

fuzz_target!(|data: &[u8]| {
    let Some((&total, spec)) = data.split_first() else {
        return;
    };
    let Ok(spec) = std::str::from_utf8(spec) else {
        return;
    };
    let total = usize::from(total);

    if let Ok(pages) = PageIndexSet::parse(spec, total) {
        // Parsed sets are sorted, unique and in bounds.
        assert!(pages.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(pages.iter().all(|index| index < total));

        // The compact form parses back to the same set.
        let again = PageIndexSet::parse(&pages.to_string(), total);
        if !pages.is_empty() {
            assert_eq!(again.ok(), Some(pages));
        }
    }
});
