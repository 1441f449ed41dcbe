use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;

const DOT_ATOM_PATTERN: &str =
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$";
const DOMAIN_NAME_PATTERN: &str = r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9-]{1,59})$";

// Both patterns are compile-time constants covered by `patterns_compile`; `Regex::new`
// can only fail on them if the constants themselves are edited into invalid syntax.
static DOT_ATOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DOT_ATOM_PATTERN)
        .unwrap_or_else(|err| unreachable!("invalid dot-atom pattern: {err}"))
});

static DOMAIN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DOMAIN_NAME_PATTERN)
        .unwrap_or_else(|err| unreachable!("invalid domain pattern: {err}"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    Invalid { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::Invalid { field, input } => write!(f, "invalid {field}: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check an email address against the RFC 5322 `addr-spec` grammar.
///
/// The local part is either a dot-atom or a quoted string; a quoted local part may
/// contain `@`. Exactly one unquoted `@` must separate the local part from the domain,
/// which is either a DNS name (see [`is_valid_domain_name`]) or a bracketed IP literal.
pub fn is_valid_address(input: &str) -> bool {
    let Some((local, domain)) = split_address(input) else {
        return false;
    };
    is_valid_local_part(local) && (is_valid_domain_name(domain) || is_valid_domain_literal(domain))
}

/// Check a DNS domain name (RFC 1035 labels, at least two of them, alphabetic or
/// punycode top-level label). Surrounding whitespace and a leading `@` are rejected.
pub fn is_valid_domain_name(input: &str) -> bool {
    input.len() <= MAX_DOMAIN_LEN && DOMAIN_NAME.is_match(input)
}

/// Split on the single unquoted `@`. Returns `None` when there is no such `@`, more
/// than one, or an unterminated quoted string.
fn split_address(input: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut at = None;

    for (idx, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '@' if !in_quotes => {
                if at.is_some() {
                    return None;
                }
                at = Some(idx);
            }
            _ => {}
        }
    }

    if in_quotes || escaped {
        return None;
    }
    let idx = at?;
    Some((input.get(..idx)?, input.get(idx + 1..)?))
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return false;
    }
    match local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(quoted) => is_valid_quoted_content(quoted),
        None => DOT_ATOM.is_match(local),
    }
}

fn is_valid_quoted_content(content: &str) -> bool {
    let mut escaped = false;
    for ch in content.chars() {
        if !(' '..='~').contains(&ch) {
            return false;
        }
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return false;
        }
    }
    !escaped
}

fn is_valid_domain_literal(domain: &str) -> bool {
    let Some(inner) = domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return false;
    };
    match inner.strip_prefix("IPv6:") {
        Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
        None => inner.parse::<Ipv4Addr>().is_ok(),
    }
}
