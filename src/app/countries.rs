//! Built-in catalog of storefront market codes
//!
//! The default list covers every storefront that serves the public review
//! feed. Configuration may substitute the whole list but not edit it item by
//! item.

use crate::app::models::CountryCode;
use crate::errors::ConfigResult;

/// Market codes queried when configuration does not override them
pub const DEFAULT_COUNTRY_CODES: &[&str] = &[
    "DZ", "AO", "AI", "AR", "AM", "AU", "AT", "AZ", "BH", "BB", "BY", "BE", "BZ", "BM", "BO",
    "BW", "BR", "VG", "BN", "BG", "CA", "KY", "CL", "CN", "CO", "CR", "HR", "CY", "CZ", "DK",
    "DM", "EC", "EG", "SV", "EE", "FI", "FR", "DE", "GH", "GB", "GR", "GD", "GT", "GY", "HN",
    "HK", "HU", "IS", "IN", "ID", "IE", "IL", "IT", "JM", "JP", "JO", "KE", "KW", "LV", "LB",
    "LT", "LU", "MO", "MG", "MY", "ML", "MT", "MU", "MX", "MS", "NP", "NL", "NZ", "NI", "NE",
    "NG", "NO", "OM", "PK", "PA", "PY", "PE", "PH", "PL", "PT", "QA", "MK", "RO", "RU", "SA",
    "SN", "SG", "SK", "SI", "ZA", "KR", "ES", "LK", "SR", "SE", "CH", "TW", "TZ", "TH", "TN",
    "TR", "UG", "UA", "AE", "US", "UY", "UZ", "VE", "VN", "YE",
];

/// Ordered, duplicate-free list of markets to query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCatalog {
    codes: Vec<CountryCode>,
}

impl CountryCatalog {
    /// Build a catalog from validated codes, dropping repeats
    pub fn new(codes: impl IntoIterator<Item = CountryCode>) -> Self {
        let mut deduped: Vec<CountryCode> = Vec::new();
        for code in codes {
            if !deduped.contains(&code) {
                deduped.push(code);
            }
        }
        Self { codes: deduped }
    }

    /// Parse a list of raw code strings, failing on the first invalid one
    pub fn from_strs<S: AsRef<str>>(codes: &[S]) -> ConfigResult<Self> {
        let parsed = codes
            .iter()
            .map(|code| code.as_ref().parse::<CountryCode>())
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self::new(parsed))
    }

    pub fn codes(&self) -> &[CountryCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_COUNTRY_CODES
                .iter()
                .filter_map(|code| code.parse::<CountryCode>().ok()),
        )
    }
}
