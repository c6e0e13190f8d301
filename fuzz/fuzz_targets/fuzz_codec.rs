#![no_main]
use arbitrary::Arbitrary;
use imtext::{ParseIntError, Text, int};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Input {
    /// Format, then parse the rendering back.
    Roundtrip { value: i32, radix: u8 },
    /// Arbitrary bytes through every parser; only panics are failures.
    Bytes { bytes: Vec<u8>, radix: u8 },
    /// Arbitrary UTF-16 through the parsers via `Text`.
    Units { units: Vec<u16>, radix: u8 },
}

fn check_parsed(result: Result<i32, ParseIntError>, radix: u32) {
    if !(2..=36).contains(&radix) {
        assert_eq!(result, Err(ParseIntError::InvalidRadix(radix)));
    }
}

fuzz_target!(|input: Input| {
    match input {
        Input::Roundtrip { value, radix } => {
            let radix = u32::from(radix);
            let signed = int::to_string_radix(value, radix);
            let unsigned = int::to_unsigned_string_radix(value, radix);
            let used = if (2..=36).contains(&radix) { radix } else { 10 };
            assert_eq!(int::parse_int(signed.as_str(), used), Ok(value), "{signed}");
            assert_eq!(
                int::parse_unsigned_int(unsigned.as_str(), used),
                Ok(value),
                "{unsigned}"
            );
            assert_eq!(Text::value_of(value), int::to_string(value).as_str());
        }
        Input::Bytes { bytes, radix } => {
            let radix = u32::from(radix);
            check_parsed(int::parse_int(bytes.as_slice(), radix), radix);
            check_parsed(int::parse_unsigned_int(bytes.as_slice(), radix), radix);
            let _ = int::decode(bytes.as_slice());
        }
        Input::Units { units, radix } => {
            let radix = u32::from(radix);
            let text = Text::from(units);
            let direct = int::parse_int(text.as_units(), radix);
            assert_eq!(int::parse_int(&text, radix), direct);
            check_parsed(direct, radix);
            let _ = int::decode(&text);
        }
    }
});
