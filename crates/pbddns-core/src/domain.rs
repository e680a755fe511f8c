//! Splitting a fully-qualified name into root domain and subdomain prefix

use crate::error::{Error, Result};
use std::fmt;

/// A fully-qualified domain name split at the registrable domain.
///
/// The root domain is always the last two labels. Public suffixes such as
/// `co.uk` are not special-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    root_domain: String,
    sub_domain: String,
}

impl DomainName {
    /// Parse and split a domain name.
    ///
    /// ```
    /// use pbddns_core::DomainName;
    ///
    /// let name = DomainName::parse("www.example.com").unwrap();
    /// assert_eq!(name.root_domain(), "example.com");
    /// assert_eq!(name.sub_domain(), "www");
    /// ```
    pub fn parse(fqdn: &str) -> Result<Self> {
        let fqdn = fqdn.trim();
        let fqdn = fqdn.strip_suffix('.').unwrap_or(fqdn);

        if fqdn.is_empty() {
            return Err(Error::invalid_input("Domain name cannot be empty"));
        }

        let labels: Vec<&str> = fqdn.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return Err(Error::invalid_input(format!(
                "Domain name has empty label: '{}'",
                fqdn
            )));
        }

        if labels.len() < 2 {
            return Err(Error::invalid_input(format!(
                "Domain name needs at least two labels: '{}'",
                fqdn
            )));
        }

        let split = labels.len() - 2;
        Ok(Self {
            root_domain: labels[split..].join("."),
            sub_domain: labels[..split].join("."),
        })
    }

    /// The registrable domain, e.g. `example.com`
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Labels preceding the root domain; empty for the apex
    pub fn sub_domain(&self) -> &str {
        &self.sub_domain
    }

    /// Whether this name is the root domain itself
    pub fn is_apex(&self) -> bool {
        self.sub_domain.is_empty()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_apex() {
            f.write_str(&self.root_domain)
        } else {
            write!(f, "{}.{}", self.sub_domain, self.root_domain)
        }
    }
}

impl std::str::FromStr for DomainName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
