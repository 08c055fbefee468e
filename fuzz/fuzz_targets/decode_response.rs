#![no_main]

use libfuzzer_sys::fuzz_target;
use passgen_protocol::core::packet::PasswordResponse;

fuzz_target!(|data: &[u8]| {
    if let Ok(response) = PasswordResponse::from_bytes(data) {
        assert!(response.password.is_ascii());
        assert!(!response.password.contains('\0'));
    }
});
