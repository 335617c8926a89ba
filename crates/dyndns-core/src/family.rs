//! Address family tags for the two supported record types.

use serde::{Deserialize, Serialize};

/// IP address family of a caller-supplied address.
///
/// Each family carries the DNS record type it maps to and the
/// human-readable name used in cache file names and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4, managed through A records
    V4,
    /// IPv6, managed through AAAA records
    V6,
}

impl AddressFamily {
    /// The DNS resource record type for this family.
    pub fn record_type(self) -> &'static str {
        match self {
            AddressFamily::V4 => "A",
            AddressFamily::V6 => "AAAA",
        }
    }

    /// Human-readable family name.
    pub fn name(self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_types_match_families() {
        assert_eq!(AddressFamily::V4.record_type(), "A");
        assert_eq!(AddressFamily::V6.record_type(), "AAAA");
    }

    #[test]
    fn names_match_families() {
        assert_eq!(AddressFamily::V4.name(), "IPv4");
        assert_eq!(AddressFamily::V6.name(), "IPv6");
        assert_eq!(format!("{}", AddressFamily::V6), "IPv6");
    }
}
