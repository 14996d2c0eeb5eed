//! Node identifiers.
//!
//! Every node of a document (group, slide, element, cue, arrangement) carries
//! an uppercase RFC4122 v4 identifier. Builders draw them from an
//! [`IdGenerator`] so tests can swap in deterministic identifiers.
use std::fmt::Write as FmtWrite;

/// Source of fresh node identifiers.
///
/// Implementations must never hand out the same identifier twice.
pub trait IdGenerator {
    /// Return the next identifier.
    fn next_id(&mut self) -> String;
}

/// Random v4 identifiers, the generator used for real documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        generate_guid()
    }
}

/// Deterministic identifiers `00000000-0000-4000-8000-000000000001`, `...002`, ...
///
/// Still shaped like v4 identifiers, so output built with it passes the same
/// format checks as random output.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    counter: u64,
}

impl SequentialIdGenerator {
    /// Create a generator whose first identifier ends in `...001`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        let mut bytes = [0u8; 16];
        bytes[10..16].copy_from_slice(&self.counter.to_be_bytes()[2..8]);
        set_v4_bits(&mut bytes);
        format_guid(&bytes)
    }
}

/// Generate a random RFC4122 v4 GUID as raw 16 bytes
pub fn generate_guid_bytes() -> [u8; 16] {
    let mut bytes: [u8; 16] = rand::random();
    set_v4_bits(&mut bytes);
    bytes
}

/// Generate a random GUID in the form XXXXXXXX-XXXX-4XXX-XXXX-XXXXXXXXXXXX
pub fn generate_guid() -> String {
    format_guid(&generate_guid_bytes())
}

#[inline]
fn set_v4_bits(bytes: &mut [u8; 16]) {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

/// Format raw GUID bytes as uppercase hyphenated hex.
pub fn format_guid(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, b) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{:02X}", b);
    }
    out
}
