#![no_main]
use libfuzzer_sys::fuzz_target;

use libpolycalc::{parse_poly, ParserOptions};

fuzz_target!(|line: &[u8]| {
    let opts = ParserOptions::default();
    if let Ok(poly) = parse_poly(line, 1, &opts) {
        let printed = poly.to_string();
        match parse_poly(printed.as_bytes(), 1, &opts) {
            Ok(reparsed) => assert_eq!(poly, reparsed, "{} does not round-trip", printed),
            Err(e) => panic!("{} does not re-parse: {}", printed, e),
        }
    }
});
