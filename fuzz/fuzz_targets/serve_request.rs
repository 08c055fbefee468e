#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use passgen_protocol::config::UnknownClassPolicy;
use passgen_protocol::core::packet::PasswordRequest;
use passgen_protocol::password::rng::std_rng;
use passgen_protocol::password::PasswordGenerator;
use passgen_protocol::protocol::{serve_request, ServeOutcome};

#[derive(Debug, Arbitrary)]
struct Input {
    selector: u8,
    length: String,
    reject_unknown: bool,
    seed: u64,
}

fuzz_target!(|input: Input| {
    // Untrusted request content must never produce a reply that overflows the wire
    let request = PasswordRequest::new(input.selector as char, input.length);
    let policy = if input.reject_unknown {
        UnknownClassPolicy::Reject
    } else {
        UnknownClassPolicy::Numeric
    };
    let mut generator = PasswordGenerator::new(std_rng(Some(input.seed)));

    let outcome = serve_request(&mut generator, policy, &request);
    if let ServeOutcome::Generated { class, length, password, .. } = &outcome {
        assert_eq!(password.len(), length.get());
        assert!(password.chars().all(|c| class.contains(c)));
    }
    assert!(outcome.response().to_bytes().is_ok());
});
