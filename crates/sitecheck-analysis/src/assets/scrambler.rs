//! Keyless email obfuscation: a length-keyed sequence of character swaps.
//!
//! Swap `i` exchanges positions `i` and `i + (i + len) % (len - i)`.
//! Scrambling applies the swaps for `i` ascending; unscrambling applies the
//! same swaps descending. Works over Unicode scalar values.

/// The swap pairs in scrambling order.
pub fn swap_sequence(len: usize) -> Vec<(usize, usize)> {
    (0..len.saturating_sub(1))
        .map(|i| (i, i + (i + len) % (len - i)))
        .collect()
}

pub fn scramble(email: &str) -> String {
    let mut chars: Vec<char> = email.chars().collect();
    for (i, j) in swap_sequence(chars.len()) {
        chars.swap(i, j);
    }
    chars.into_iter().collect()
}

pub fn unscramble(scrambled: &str) -> String {
    let mut chars: Vec<char> = scrambled.chars().collect();
    for (i, j) in swap_sequence(chars.len()).into_iter().rev() {
        chars.swap(i, j);
    }
    chars.into_iter().collect()
}

/// A sample that failed the round-trip or came back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripFailure {
    pub sample: String,
    pub scrambled: String,
    pub unscrambled: String,
}

/// Samples whose round-trip does not restore the input, or whose scrambled
/// form still equals the input (strings of three characters or fewer are
/// left as they are by construction and only need to round-trip).
pub fn round_trip_failures(samples: &[String]) -> Vec<RoundTripFailure> {
    samples
        .iter()
        .filter_map(|sample| {
            let scrambled = scramble(sample);
            let unscrambled = unscramble(&scrambled);
            let unchanged = scrambled == *sample && sample.chars().count() > 3;
            if unscrambled != *sample || unchanged {
                Some(RoundTripFailure {
                    sample: sample.clone(),
                    scrambled,
                    unscrambled,
                })
            } else {
                None
            }
        })
        .collect()
}
