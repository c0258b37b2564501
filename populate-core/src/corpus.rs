//! Alphabets and reference data the built-in generators draw from.

use once_cell::sync::Lazy;
use rand::Rng;

/// Characters random strings are drawn from: ASCII letters and digits plus
/// accented Latin and Greek letters.
pub const TEXT_ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'r', 's', 't',
    'u', 'v', 'x', 'z', 'y', 'w', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'R', 'S', 'T', 'U', 'V', 'X', 'Z', 'Y', 'W', '0', '1', '2', '3', '4', '5', '6',
    '7', '8', '9', 'ă', 'î', 'â', 'ş', 'ţ', 'Ă', 'Î', 'Â', 'Ş', 'Ţ', 'α', 'β', 'ψ', 'δ', 'ε', 'φ',
    'γ', 'η', 'ι', 'ξ', 'κ', 'λ', 'μ', 'ν', 'ο', 'π', 'ρ', 'σ', 'τ', 'θ', 'ω', 'χ', 'ζ', 'Α', 'Β',
    'Ψ', 'Δ', 'Ε', 'Φ', 'Γ', 'Η', 'Ι', 'Ξ', 'Κ', 'Λ', 'Μ', 'Ν', 'Ο', 'Π', 'Ρ', 'Σ', 'Τ', 'Ω',
];

/// Characters of host labels and path segments.
pub const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

/// Real top-level domains, lowercased, without internationalized entries.
pub static TLDS: Lazy<Vec<String>> = Lazy::new(|| {
    include_str!("corpus/tlds.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_lowercase)
        .filter(|line| !line.starts_with("xn--"))
        .collect()
});

/// Random text of `1..=max_chars` characters from [`TEXT_ALPHABET`].
pub fn text<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
    let size = rng.gen_range(1..=max_chars.max(1));
    (0..size)
        .map(|_| TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())])
        .collect()
}

/// Random name of `1..=max_len` characters from [`NAME_ALPHABET`].
///
/// Names never start or end with `-`, so they are valid host labels.
pub fn name<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> String {
    let size = rng.gen_range(1..=max_len.max(1));
    (0..size)
        .map(|i| {
            let edge = i == 0 || i == size - 1;
            let pool = if edge {
                &NAME_ALPHABET[..NAME_ALPHABET.len() - 1]
            } else {
                NAME_ALPHABET
            };
            pool[rng.gen_range(0..pool.len())] as char
        })
        .collect()
}
