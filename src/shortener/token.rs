//! Short token generation.

use rand::Rng;

/// Characters a generated token is drawn from.
pub const TOKEN_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Returns a random token of `length` characters from `TOKEN_ALPHABET`.
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Source of candidate tokens for new links.
pub trait TokenSource: Send + Sync {
    fn next_token(&self) -> String;
}

/// Fixed-length random tokens.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokens {
    length: usize,
}

impl RandomTokens {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl TokenSource for RandomTokens {
    fn next_token(&self) -> String {
        generate_token(self.length)
    }
}
