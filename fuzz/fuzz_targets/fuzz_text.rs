#![no_main]
use arbitrary::Arbitrary;
use imtext::{SplitLimit, Text, charset};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    source: Vec<u16>,
    target: Vec<u16>,
    begin: u16,
    end: u16,
    from: u16,
    limit: i8,
    bytes: Vec<u8>,
}

fn naive_index_of(source: &[u16], target: &[u16], from: usize) -> Option<usize> {
    if from > source.len() {
        return target.is_empty().then_some(source.len());
    }
    (from..=source.len().saturating_sub(target.len())).find(|&i| source[i..].starts_with(target))
}

fuzz_target!(|input: Input| {
    let whole = Text::from(input.source);
    let (begin, end) = (usize::from(input.begin), usize::from(input.end));
    // Either a window onto the block or the whole text.
    let source = whole.substring_range(begin.min(end), end.max(begin)).unwrap_or(whole);
    source.assert_invariants();

    let target = Text::from(input.target);
    let from = usize::from(input.from);
    let found = source.index_of(&target, from);
    assert_eq!(found, naive_index_of(source.as_units(), target.as_units(), from));
    if let Some(at) = source.last_index_of(&target, from) {
        assert!(source.starts_with_at(&target, at));
        assert!(at <= from);
    }

    if !target.is_empty() {
        let pieces = source.split(&target, SplitLimit::Unlimited);
        assert_eq!(Text::join(&target, &pieces), source);
        for piece in &pieces {
            piece.assert_invariants();
            assert!(!piece.contains(&target));
        }
    }
    let limited = source.split(&target, SplitLimit::from_signed(i32::from(input.limit)));
    if let SplitLimit::AtMost(n) = SplitLimit::from_signed(i32::from(input.limit)) {
        assert!(limited.len() <= n);
    }

    assert_eq!(source.replace(&target, &target), source);

    assert_eq!(source.hash_code(), Text::from_units(source.as_units()).hash_code());
    source.assert_invariants();

    let be = source.get_bytes(&charset::Utf16Be);
    assert_eq!(Text::from_bytes(&be, &charset::Utf16Be), source);
    let decoded = Text::from_bytes(&input.bytes, &charset::Utf8);
    if let Ok(s) = core::str::from_utf8(&input.bytes) {
        assert_eq!(decoded, s);
    }
    let _ = decoded.get_bytes(&charset::Utf8);
});
