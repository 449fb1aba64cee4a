//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 2-character NJ Transit station abbreviation.
///
/// Codes are two ASCII uppercase letters or digits (`NY`, `CM`, `2A`).
/// Schedules are keyed by full station names; the code is only used to
/// address the upstream API and to talk about stations compactly.
///
/// # Examples
///
/// ```
/// use trains_skill::domain::StationCode;
///
/// let ny = StationCode::parse("NY").unwrap();
/// assert_eq!(ny.as_str(), "NY");
///
/// // Lowercase is rejected by `parse` but accepted by `parse_normalized`
/// assert!(StationCode::parse("ny").is_err());
/// assert!(StationCode::parse_normalized(" ny ").is_ok());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("N").is_err());
/// assert!(StationCode::parse("NYP").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 2]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 2 characters, each an uppercase ASCII
    /// letter or an ASCII digit.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidStationCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1]]))
    }

    /// Parse after trimming whitespace and upper-casing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
