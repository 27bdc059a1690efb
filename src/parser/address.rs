//! From/Cc header micro-parsers.

use std::sync::LazyLock;

use regex::Regex;

/// One parsed recipient entry from an address header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailAddress {
    /// The bare email address, or empty when none could be extracted.
    pub address: String,
    /// Display name preceding the angle bracket, quotes stripped; empty
    /// when absent.
    pub name: String,
    /// The trimmed original entry text.
    pub raw: String,
}

/// Conservative address match anchored to the end of the entry: the
/// address must be at the start, after whitespace, or inside angle
/// brackets, so a name that merely resembles an address
/// (`john@doe.com <jane@doe.com>`) never shadows the real one.
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(?:^|[\s<])([\w.%+-]+@[\w.-]+\.[A-Za-z]{2,4})>?$").expect("valid address pattern")
});

/// Display name: everything before the angle bracket.
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(.+)\s*<").expect("valid name pattern")
});

/// Parse a single RFC-style recipient string like
/// `"John Doe" <john@doe.com>`.
///
/// The address field is empty when the entry carries nothing matching the
/// conservative email pattern.
#[must_use]
pub fn parse_single_address(raw: &str) -> MailAddress {
    let raw = raw.trim();

    let address = ADDRESS
        .captures(raw)
        .map_or_else(String::new, |caps| caps[1].to_owned());

    let name = NAME.captures(raw).map_or_else(String::new, |caps| {
        caps[1]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_owned()
    });

    MailAddress {
        address,
        name,
        raw: raw.to_owned(),
    }
}

/// Parse a comma-separated address header (Cc, To) into ordered entries.
///
/// Entries that trim to nothing or yield no extractable address are
/// dropped; the remaining entries keep their input order. Quoted display
/// names containing commas split into fragments, of which only the
/// fragment holding the address survives, a known lossy trade-off of the
/// comma split.
#[must_use]
pub fn parse_address_list(raw: &str) -> Vec<MailAddress> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_single_address)
        .filter(|entry| !entry.address.is_empty())
        .collect()
}
