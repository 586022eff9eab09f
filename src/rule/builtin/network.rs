//! E-mail address validation with optional stricter checks.

use std::net::{IpAddr, ToSocketAddrs};

use serde_json::Value;

use crate::rule::domain::{ConfigurationError, ConfigurationResult, Inputs, Rule};

const LOCAL_PART_MAX: usize = 64;
const ADDRESS_MAX: usize = 254;
const LABEL_MAX: usize = 63;

/// Checks an [`Email`] rule can apply on top of the baseline syntax check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailCheck {
    /// Baseline RFC 5322 syntax; always applied.
    Rfc,
    /// RFC syntax without the obsolete or unusual forms (quoted local
    /// parts, address literals, single-label domains).
    Strict,
    /// ASCII-only address with a dotted domain.
    Filter,
    /// Like `Filter`, but the local part may contain Unicode.
    FilterUnicode,
    /// The domain resolves to at least one address. Blocking lookup.
    Dns,
    /// No invisible characters and no mixing of ASCII and non-ASCII
    /// letters.
    Spoof,
}

impl EmailCheck {
    fn parse(flag: &str) -> ConfigurationResult<Option<Self>> {
        let check = match flag.trim() {
            "" => return Ok(None),
            "rfc" => Self::Rfc,
            "strict" => Self::Strict,
            "filter" => Self::Filter,
            "filter_unicode" => Self::FilterUnicode,
            "dns" => Self::Dns,
            "spoof" => Self::Spoof,
            other => {
                return Err(ConfigurationError::invalid_parameter(
                    "email",
                    other,
                    "expected one of rfc, strict, filter, filter_unicode, dns, spoof",
                ));
            }
        };
        Ok(Some(check))
    }

    fn accepts(self, address: &Address<'_>) -> bool {
        match self {
            Self::Rfc => true,
            Self::Strict => {
                !address.local.starts_with('"')
                    && !address.domain.starts_with('[')
                    && address.domain.contains('.')
            }
            Self::Filter => address.whole.is_ascii() && is_dotted_hostname(address.domain),
            Self::FilterUnicode => {
                address.domain.is_ascii() && is_dotted_hostname(address.domain)
            }
            Self::Dns => resolves(address.domain),
            Self::Spoof => !looks_spoofed(address.whole),
        }
    }
}

/// `email[:flags]`: an e-mail address, optionally passing every listed
/// [`EmailCheck`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &str {
        "email"
    }

    fn evaluate(
        &self,
        _field: &str,
        value: &Value,
        parameters: &[String],
        _inputs: &Inputs,
    ) -> ConfigurationResult<bool> {
        let mut checks = Vec::with_capacity(parameters.len());
        for flag in parameters {
            if let Some(check) = EmailCheck::parse(flag)? {
                checks.push(check);
            }
        }

        let Some(address) = value.as_str().and_then(Address::parse) else {
            return Ok(false);
        };

        Ok(checks.iter().all(|check| check.accepts(&address)))
    }
}

/// A syntactically valid address split at its last `@`.
#[derive(Debug)]
struct Address<'a> {
    whole: &'a str,
    local: &'a str,
    domain: &'a str,
}

impl<'a> Address<'a> {
    fn parse(whole: &'a str) -> Option<Self> {
        if whole.len() > ADDRESS_MAX {
            return None;
        }
        let (local, domain) = whole.rsplit_once('@')?;
        let valid = local.len() <= LOCAL_PART_MAX
            && (is_dot_atom(local) || is_quoted(local))
            && (is_hostname(domain) || is_address_literal(domain));

        valid.then_some(Self {
            whole,
            local,
            domain,
        })
    }
}

fn is_atext(character: char) -> bool {
    character.is_alphanumeric()
        || (!character.is_ascii() && !character.is_control() && !character.is_whitespace())
        || "!#$%&'*+/=?^_`{|}~-".contains(character)
}

fn is_dot_atom(text: &str) -> bool {
    !text.is_empty()
        && text
            .split('.')
            .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_quoted(text: &str) -> bool {
    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut characters = inner.chars();
    while let Some(character) = characters.next() {
        match character {
            '\\' => {
                if characters.next().is_none() {
                    return false;
                }
            }
            '"' => return false,
            other if other.is_control() => return false,
            _ => {}
        }
    }
    true
}

fn is_hostname(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= LABEL_MAX
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|character| character.is_alphanumeric() || character == '-')
        })
}

fn is_dotted_hostname(domain: &str) -> bool {
    domain.contains('.') && is_hostname(domain)
}

fn is_address_literal(domain: &str) -> bool {
    domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(|inner| inner.strip_prefix("IPv6:").unwrap_or(inner))
        .is_some_and(|address| address.parse::<IpAddr>().is_ok())
}

fn resolves(domain: &str) -> bool {
    let host = domain.trim_start_matches('[').trim_end_matches(']');
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    (host, 25_u16)
        .to_socket_addrs()
        .is_ok_and(|mut addresses| addresses.next().is_some())
}

fn looks_spoofed(address: &str) -> bool {
    let invisible = address.chars().any(|character| {
        character.is_control()
            || matches!(
                character,
                '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}' | '\u{FEFF}'
            )
    });
    let ascii_letters = address.chars().any(|character| character.is_ascii_alphabetic());
    let other_letters = address
        .chars()
        .any(|character| character.is_alphabetic() && !character.is_ascii());

    invisible || (ascii_letters && other_letters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn evaluate(value: &Value, flags: &[&str]) -> ConfigurationResult<bool> {
        let parameters: Vec<String> = flags.iter().map(|flag| (*flag).to_owned()).collect();
        Email.evaluate("email", value, &parameters, &Inputs::new())
    }

    #[rstest]
    #[case("hello@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("\"john doe\"@example.com", true)]
    #[case("user@[127.0.0.1]", true)]
    #[case("user@localhost", true)]
    #[case("jörg@bücher.de", true)]
    #[case("merloxx", false)]
    #[case("@example.com", false)]
    #[case("user@", false)]
    #[case("user..name@example.com", false)]
    #[case("user@-example.com", false)]
    #[case("user@exa mple.com", false)]
    fn rfc_syntax(#[case] address: &str, #[case] expected: bool) {
        assert_eq!(evaluate(&json!(address), &[]), Ok(expected));
        assert_eq!(evaluate(&json!(address), &["rfc"]), Ok(expected));
    }

    #[rstest]
    #[case("hello@example.com", &["strict"], true)]
    #[case("\"john doe\"@example.com", &["strict"], false)]
    #[case("user@localhost", &["strict"], false)]
    #[case("user@[127.0.0.1]", &["strict"], false)]
    #[case("jörg@bücher.de", &["filter"], false)]
    #[case("jörg@example.de", &["filter_unicode"], true)]
    #[case("jörg@bücher.de", &["filter_unicode"], false)]
    #[case("hello@example.com", &["filter", "strict"], true)]
    #[case("pаypal@example.com", &["spoof"], false)]
    #[case("hel\u{200B}lo@example.com", &["spoof"], false)]
    #[case("hello@example.com", &["spoof"], true)]
    fn optional_checks(#[case] address: &str, #[case] flags: &[&str], #[case] expected: bool) {
        assert_eq!(evaluate(&json!(address), flags), Ok(expected));
    }

    #[rstest]
    fn address_literal_satisfies_dns_without_lookup() {
        assert_eq!(evaluate(&json!("user@[127.0.0.1]"), &["dns"]), Ok(true));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(42))]
    #[case(json!(["hello@example.com"]))]
    fn non_strings_fail(#[case] value: Value) {
        assert_eq!(evaluate(&value, &[]), Ok(false));
    }

    #[rstest]
    fn unknown_flag_is_a_configuration_error() {
        assert!(matches!(
            evaluate(&json!("hello@example.com"), &["mx"]),
            Err(ConfigurationError::InvalidParameter { .. })
        ));
    }
}
