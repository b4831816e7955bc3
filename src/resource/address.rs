//! Resource instance addresses.
//!
//! An address identifies one resource instance in the state, for example
//! `module.network.module.vpc[0].aws_subnet.private["a"]`. The canonical
//! string is what the state tool understands; the parsed components are
//! exposed for matching.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::PlanReadError;

/// Whether an address names a managed resource or a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceMode {
    /// A managed resource with persisted state.
    #[default]
    Managed,
    /// A `data.` source, re-read on every plan.
    Data,
}

/// Instance key of a resource created with `count` or `for_each`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceKey {
    /// Integer key from `count`.
    Int(i64),
    /// String key from `for_each`.
    Str(String),
}

/// Address of a single resource instance.
///
/// Equality, hashing and ordering use the canonical string only.
#[derive(Debug, Clone)]
pub struct ResourceAddress {
    raw: String,
    module: Option<String>,
    mode: ResourceMode,
    resource_type: String,
    name: String,
    index: Option<InstanceKey>,
}

impl ResourceAddress {
    /// Parses an address string.
    ///
    /// # Errors
    ///
    /// Returns [`PlanReadError::InvalidAddress`] if the string is not a
    /// resource instance address.
    pub fn parse(raw: &str) -> Result<Self, PlanReadError> {
        let invalid = |reason: &str| PlanReadError::invalid_address(raw, reason);

        let segments = split_segments(raw).map_err(|reason| invalid(&reason))?;
        let mut rest = segments.as_slice();

        let mut module_parts = Vec::new();
        while let [(ident, None), module_name, tail @ ..] = rest {
            if *ident != "module" {
                break;
            }
            module_parts.push(render_segment(module_name));
            rest = tail;
        }

        let mode = match rest {
            [("data", None), tail @ ..] if tail.len() == 2 => {
                rest = tail;
                ResourceMode::Data
            }
            _ => ResourceMode::Managed,
        };

        let [(resource_type, type_key), (name, index)] = rest else {
            return Err(invalid("expected <type>.<name> after the module path"));
        };
        if type_key.is_some() {
            return Err(invalid("resource type cannot carry an instance key"));
        }

        let module = if module_parts.is_empty() {
            None
        } else {
            Some(
                module_parts
                    .iter()
                    .map(|part| format!("module.{part}"))
                    .collect::<Vec<_>>()
                    .join("."),
            )
        };

        Ok(Self {
            raw: raw.to_string(),
            module,
            mode,
            resource_type: (*resource_type).to_string(),
            name: (*name).to_string(),
            index: index.clone(),
        })
    }

    /// Returns the canonical address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the module path (`module.a.module.b`), if any.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns the resource mode.
    #[must_use]
    pub const fn mode(&self) -> ResourceMode {
        self.mode
    }

    /// Returns the resource type, e.g. `aws_instance`.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the resource name component.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the instance key, if any.
    #[must_use]
    pub const fn index(&self) -> Option<&InstanceKey> {
        self.index.as_ref()
    }
}

type Segment<'a> = (&'a str, Option<InstanceKey>);

/// Splits an address on top-level dots, keeping bracketed keys intact.
fn split_segments(raw: &str) -> Result<Vec<Segment<'_>>, String> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' if in_brackets => in_quotes = !in_quotes,
            '[' if !in_quotes => {
                if in_brackets {
                    return Err(String::from("nested brackets"));
                }
                in_brackets = true;
            }
            ']' if !in_quotes => {
                if !in_brackets {
                    return Err(String::from("unbalanced brackets"));
                }
                in_brackets = false;
            }
            '.' if !in_brackets => {
                segments.push(parse_segment(&raw[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_brackets || in_quotes {
        return Err(String::from("unterminated instance key"));
    }
    segments.push(parse_segment(&raw[start..])?);
    Ok(segments)
}

fn parse_segment(segment: &str) -> Result<Segment<'_>, String> {
    let (ident, key) = match segment.find('[') {
        Some(open) => {
            let Some(inner) = segment[open + 1..].strip_suffix(']') else {
                return Err(format!("trailing characters after instance key in '{segment}'"));
            };
            (&segment[..open], Some(parse_key(inner)?))
        }
        None => (segment, None),
    };

    if ident.is_empty() {
        return Err(String::from("empty address segment"));
    }
    if !ident
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!("invalid identifier '{ident}'"));
    }
    Ok((ident, key))
}

fn parse_key(inner: &str) -> Result<InstanceKey, String> {
    if inner.starts_with('"') {
        serde_json::from_str::<String>(inner)
            .map(InstanceKey::Str)
            .map_err(|e| format!("invalid string key {inner}: {e}"))
    } else {
        inner
            .parse::<i64>()
            .map(InstanceKey::Int)
            .map_err(|_| format!("invalid instance key [{inner}]"))
    }
}

fn render_segment((ident, key): &Segment<'_>) -> String {
    key.as_ref()
        .map_or_else(|| (*ident).to_string(), |key| format!("{ident}{key}"))
}

impl FromStr for ResourceAddress {
    type Err = PlanReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for ResourceAddress {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ResourceAddress {}

impl Hash for ResourceAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for ResourceAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "[{i}]"),
            Self::Str(s) => write!(f, "[{s:?}]"),
        }
    }
}
