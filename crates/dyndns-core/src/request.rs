//! Request-side value types: the record/zone split of a trigger domain.

use crate::error::{Error, Result};

/// A trigger domain split into record name and zone domain.
///
/// The zone is the last two labels of the domain; everything before them
/// is the record name, or `@` for the zone apex. `home.example.com`
/// splits into record `home` and zone `example.com`; a bare `example.com`
/// becomes (`@`, `example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsName {
    record_name: String,
    zone_domain: String,
}

impl DnsName {
    /// Split a trigger domain.
    ///
    /// Domains with fewer than two labels are rejected.
    pub fn split(domain: &str) -> Result<Self> {
        let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
        if labels.len() < 2 {
            return Err(Error::invalid_domain(domain));
        }

        let zone_domain = labels[labels.len() - 2..].join(".");
        let record_name = if labels.len() == 2 {
            "@".to_string()
        } else {
            labels[..labels.len() - 2].join(".")
        };

        Ok(Self {
            record_name,
            zone_domain,
        })
    }

    /// The record part: labels before the zone, or `@` at the apex.
    pub fn record_name(&self) -> &str {
        &self.record_name
    }

    /// The apex domain: the last two labels.
    pub fn zone_domain(&self) -> &str {
        &self.zone_domain
    }

    /// Fully qualified record name as the provider query expects it.
    ///
    /// Also the file-name stem shared by this record's cache entries and
    /// its log sink.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.record_name, self.zone_domain)
    }
}

impl std::fmt::Display for DnsName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.record_name, self.zone_domain)
    }
}
