//! Stream cipher for encrypted RSDK v4 data file entries.
//!
//! Every encrypted entry is keyed only by its own byte length. Two 16-byte key
//! strings are derived from MD5 digests of the length, and a small schedule
//! walks both strings while periodically toggling a nibble swap:
//!
//! ```text
//! encrypt: b ^= key_a[pos_a]; swap?(b); b ^= counter ^ key_b[pos_b]
//! decrypt: b ^= counter ^ key_b[pos_b]; swap?(b); b ^= key_a[pos_a]
//! ```
//!
//! When both cursors run past the end of their key strings the counter steps
//! by two and the cursors restart at offsets computed from the counter with
//! the usual reciprocal-multiply division tricks (`/ 7` and `/ 12`).
//!
//! ## Usage
//!
//! ```rust
//! use rsdk_crypto::datafile_cipher::{DataFileCipher, Direction};
//!
//! let plaintext = b"Oggs audio payload";
//! let ciphertext = DataFileCipher::transform(plaintext, Direction::Encrypt);
//! let decrypted = DataFileCipher::transform(&ciphertext, Direction::Decrypt);
//! assert_eq!(plaintext, &decrypted[..]);
//! ```

use crate::md5::NameHash;

/// Reciprocal of 3 scaled by 2^33, used to divide the counter by 12
const RECIP_KEY_1: u32 = 0xAAAA_AAAB;
/// Reciprocal of 7 scaled by 2^32 (with a correction step), used to divide by 7
const RECIP_KEY_2: u32 = 0x2492_4925;

/// Direction of a cipher transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext
    Encrypt,
    /// Ciphertext to plaintext
    Decrypt,
}

/// Derive a 16-byte key string from a seed value.
///
/// The seed is hashed as its decimal text and each 32-bit word of the digest
/// is reinterpreted as little-endian.
pub fn derive_key(seed: u32) -> [u8; 16] {
    NameHash::from_data(seed.to_string().as_bytes()).to_le_words()
}

/// Upper 32 bits of an unsigned 64-bit product, reinterpreted as signed
#[allow(clippy::cast_possible_wrap)]
const fn mul_high(factor: u32, value: i32) -> i32 {
    ((factor as u64 * value as u32 as u64) >> 32) as u32 as i32
}

/// Key schedule state for a single transform.
///
/// A schedule is created from the payload length, consumed byte by byte, and
/// then dropped. It is never reused across payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchedule {
    key_a: [u8; 16],
    key_b: [u8; 16],
    pos_a: usize,
    pos_b: usize,
    /// 7-bit rotating counter
    counter: i32,
    swap_nibbles: bool,
}

impl KeySchedule {
    /// Create the initial schedule for a payload of `length` bytes
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(length: u32) -> Self {
        Self {
            key_a: derive_key(length),
            key_b: derive_key((length >> 1) + 1),
            pos_a: 0,
            pos_b: 8,
            counter: ((length / 4) & 0x7F) as i32,
            swap_nibbles: false,
        }
    }

    /// First derived key string
    pub const fn key_a(&self) -> &[u8; 16] {
        &self.key_a
    }

    /// Second derived key string
    pub const fn key_b(&self) -> &[u8; 16] {
        &self.key_b
    }

    /// Current cursor positions into `key_a` and `key_b`
    pub const fn positions(&self) -> (usize, usize) {
        (self.pos_a, self.pos_b)
    }

    /// Current value of the 7-bit counter
    pub const fn counter(&self) -> u8 {
        self.counter as u8
    }

    /// Whether the next byte will have its nibbles swapped
    pub const fn swaps_nibbles(&self) -> bool {
        self.swap_nibbles
    }

    /// Transform one byte and advance the schedule
    pub fn transform_byte(&mut self, byte: u8, direction: Direction) -> u8 {
        let outer = self.counter as u8 ^ self.key_b[self.pos_b];
        let inner = self.key_a[self.pos_a];

        let mut value = byte;
        match direction {
            Direction::Encrypt => {
                value ^= inner;
                if self.swap_nibbles {
                    value = value.rotate_left(4);
                }
                value ^= outer;
            }
            Direction::Decrypt => {
                value ^= outer;
                if self.swap_nibbles {
                    value = value.rotate_left(4);
                }
                value ^= inner;
            }
        }

        self.pos_a += 1;
        self.pos_b += 1;
        self.advance();

        value
    }

    fn advance(&mut self) {
        if self.pos_a <= 0x0F {
            if self.pos_b > 0x0C {
                self.pos_b = 0;
                self.swap_nibbles = !self.swap_nibbles;
            }
        } else if self.pos_b <= 0x08 {
            self.pos_a = 0;
            self.swap_nibbles = !self.swap_nibbles;
        } else {
            self.counter = (self.counter + 2) & 0x7F;

            let n = self.counter;
            let high_1 = mul_high(RECIP_KEY_1, n);
            let high_2 = mul_high(RECIP_KEY_2, n);
            let temp_1 = high_2 + (n - high_2) / 2;
            let temp_2 = high_1 / 8 * 3;

            // n % 7 and n % 12 respectively; both are non-negative
            let mod_7 = (n - temp_1 / 4 * 7) as usize;
            let mod_12 = (n - temp_2 * 4) as usize;

            if self.swap_nibbles {
                self.swap_nibbles = false;
                self.pos_a = mod_7;
                self.pos_b = mod_12 + 2;
            } else {
                self.swap_nibbles = true;
                self.pos_b = mod_7;
                self.pos_a = mod_12 + 3;
            }
        }
    }
}

/// Data file entry cipher.
///
/// The cipher carries no state between calls: every transform builds a fresh
/// [`KeySchedule`] from the input length, so independent entries can be
/// processed on different threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataFileCipher;

impl DataFileCipher {
    /// Transform `data` in the given direction, returning a new buffer.
    ///
    /// The schedule is keyed by `data.len()` truncated to 32 bits; payloads
    /// stored in a data file are always shorter than 2^31 bytes.
    pub fn transform(data: &[u8], direction: Direction) -> Vec<u8> {
        let mut output = data.to_vec();
        Self::apply_in_place(&mut output, direction);
        output
    }

    /// Transform `data` in place
    pub fn apply_in_place(data: &mut [u8], direction: Direction) {
        let mut schedule = KeySchedule::new(data.len() as u32);
        for byte in data.iter_mut() {
            *byte = schedule.transform_byte(*byte, direction);
        }
    }

    /// Encrypt a payload
    pub fn encrypt(data: &[u8]) -> Vec<u8> {
        Self::transform(data, Direction::Encrypt)
    }

    /// Decrypt a payload
    pub fn decrypt(data: &[u8]) -> Vec<u8> {
        Self::transform(data, Direction::Decrypt)
    }
}
