//! Password generation.
//!
//! Every position is drawn independently. Numeric, alpha, secure and
//! unambiguous passwords draw uniformly from their class charset. Mixed
//! passwords first flip a fair coin between the letter space and the digit
//! space, then draw uniformly inside the chosen space, so a digit shows up half
//! of the time even though digits are only 10 of the 36 candidates.

use super::charset::{PasswordClass, DIGITS, LOWERCASE};
use super::length::PasswordLength;
use super::rng::RandomSource;

#[derive(Debug, Clone)]
pub struct PasswordGenerator<R> {
    rng: R,
}

impl<R: RandomSource> PasswordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, class: PasswordClass, length: PasswordLength) -> String {
        let mut password = String::with_capacity(length.get());
        for _ in 0..length.get() {
            password.push(self.next_char(class));
        }
        password
    }

    fn next_char(&mut self, class: PasswordClass) -> char {
        match class {
            PasswordClass::Mixed => {
                let space = if self.rng.next_bool() { LOWERCASE } else { DIGITS };
                self.pick(space)
            }
            other => self.pick(other.charset()),
        }
    }

    fn pick(&mut self, charset: &'static [u8]) -> char {
        charset[self.rng.next_index(charset.len())] as char
    }
}
