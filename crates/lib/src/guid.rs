//! Opaque package identifiers.

use uuid::Uuid;

/// A fresh identifier: 32 uppercase hex digits, no dashes.
pub fn generate() -> String {
  Uuid::new_v4().simple().to_string().to_ascii_uppercase()
}

pub fn generate_many(count: usize) -> Vec<String> {
  (0..count).map(|_| generate()).collect()
}
