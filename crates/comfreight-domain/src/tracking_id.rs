//! Tracking identifiers for shipments

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by every tracking identifier
pub const PREFIX: &str = "CFT-";

/// Smallest number a generated tracking identifier can carry
pub const MIN_NUMBER: u32 = 10_000;

/// Largest number a generated tracking identifier can carry
pub const MAX_NUMBER: u32 = 99_999;

/// Human-readable tracking identifier of the form `CFT-#####`
///
/// Generated identifiers are drawn uniformly from `[10000, 99999]`. Generation
/// alone does not guarantee uniqueness; the store checks candidates against
/// the identifiers it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId(u32);

impl TrackingId {
    /// Draw a random tracking identifier from the thread-local RNG
    ///
    /// # Examples
    ///
    /// ```
    /// use comfreight_domain::TrackingId;
    ///
    /// let id = TrackingId::generate();
    /// assert!(id.to_string().starts_with("CFT-"));
    /// ```
    pub fn generate() -> Self {
        Self::random(&mut rand::thread_rng())
    }

    /// Draw a random tracking identifier from the given RNG
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(MIN_NUMBER..=MAX_NUMBER))
    }

    /// Create a tracking identifier from its numeric part
    ///
    /// Returns `None` when the number does not fit in five digits.
    pub fn from_number(number: u32) -> Option<Self> {
        (number <= MAX_NUMBER).then_some(Self(number))
    }

    /// Parse a tracking identifier from its `CFT-#####` form
    ///
    /// The prefix is matched case-insensitively and surrounding whitespace is
    /// ignored; the numeric part must be exactly five ASCII digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use comfreight_domain::TrackingId;
    ///
    /// let id = TrackingId::from_string("CFT-84620").unwrap();
    /// assert_eq!(id.number(), 84620);
    /// assert!(TrackingId::from_string("CFT-123").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(PREFIX))
            .and_then(|_| trimmed.get(PREFIX.len()..))
            .ok_or_else(|| format!("Invalid tracking id '{}': expected prefix {}", s, PREFIX))?;

        if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "Invalid tracking id '{}': expected five digits after {}",
                s, PREFIX
            ));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|e| format!("Invalid tracking id '{}': {}", s, e))
    }

    /// Get the numeric part
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:05}", PREFIX, self.0)
    }
}

impl std::str::FromStr for TrackingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for TrackingId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<TrackingId> for String {
    fn from(id: TrackingId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_display_format() {
        let id = TrackingId::from_number(84620).unwrap();
        assert_eq!(id.to_string(), "CFT-84620");
    }

    #[test]
    fn test_parse_accepts_lowercase_prefix() {
        let id = TrackingId::from_string(" cft-51983 ").unwrap();
        assert_eq!(id.to_string(), "CFT-51983");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TrackingId::from_string("").is_err());
        assert!(TrackingId::from_string("CFT-").is_err());
        assert!(TrackingId::from_string("CFT-1234").is_err());
        assert!(TrackingId::from_string("CFT-123456").is_err());
        assert!(TrackingId::from_string("CFT-12a45").is_err());
        assert!(TrackingId::from_string("XYZ-12345").is_err());
        assert!(TrackingId::from_string("CFT-+1234").is_err());
    }

    #[test]
    fn test_from_number_bounds() {
        assert!(TrackingId::from_number(99_999).is_some());
        assert!(TrackingId::from_number(100_000).is_none());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = TrackingId::random(&mut StdRng::seed_from_u64(7));
        let b = TrackingId::random(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_as_string() {
        let id = TrackingId::from_number(33741).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CFT-33741\"");
        let back: TrackingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<TrackingId>("\"CFT-1\"").is_err());
    }
}
