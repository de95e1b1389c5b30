//! Fuzz target for `srcguard.toml` parsing and resolution.
//!
//! Goal: arbitrary text either resolves or returns an error; it never panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use srcguard_settings::{parse_config_toml, resolve_config, Overrides};

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(cfg) = parse_config_toml(text) {
        let _ = resolve_config(cfg, Overrides::default());
    }
});
