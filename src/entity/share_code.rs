use rand::Rng;

/// Base-36 alphabet, uppercase.
pub const SHARE_CODE_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const SHARE_CODE_LEN: usize = 8;

/// Source of fresh share codes. Codes are not guaranteed unique.
pub trait ShareCodeSource {
    fn next_code(&mut self) -> String;
}

/// Uniform sampling over [`SHARE_CODE_ALPHABET`] using the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShareCodes;

impl ShareCodeSource for RandomShareCodes {
    fn next_code(&mut self) -> String {
        let mut rng = rand::rng();
        (0..SHARE_CODE_LEN)
            .map(|_| SHARE_CODE_ALPHABET[rng.random_range(0..SHARE_CODE_ALPHABET.len())] as char)
            .collect()
    }
}

/// Check that a code has the shape produced by [`RandomShareCodes`].
pub fn is_well_formed(code: &str) -> bool {
    code.len() == SHARE_CODE_LEN && code.bytes().all(|b| SHARE_CODE_ALPHABET.contains(&b))
}
