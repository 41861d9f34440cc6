//! Fuzz target for ChatEvent::decode
//!
//! Frame payloads come straight off the wire, so decoding must hold up
//! against arbitrary input: no panics, no hangs - every malformed payload
//! returns an error and gets dropped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_proto::ChatEvent;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = std::str::from_utf8(data) {
        let _ = ChatEvent::decode(payload);
    }
});
