//! Workspace slot identifier codec.
//!
//! A slot identifier is the string form `kind::name`. Only the first
//! separator is significant; decoding never fails. Inside the crate a slot
//! is always the typed pair; the string form exists only at the host
//! boundary (tab ids, storage keys, layout descriptions).

use std::fmt;

use compact_str::CompactString;

pub const KIND_SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotId {
    kind: CompactString,
    name: CompactString,
}

impl SlotId {
    /// Builds a slot from parts. The kind must not contain the separator;
    /// use [`SlotId::decode`] for untrusted input.
    pub fn new(kind: impl Into<CompactString>, name: impl Into<CompactString>) -> Self {
        let kind = kind.into();
        debug_assert!(
            !kind.contains(KIND_SEPARATOR),
            "slot kind must not contain the separator"
        );
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Total decoding: splits on the first `::`. A missing separator yields
    /// the empty-kind sentinel with the whole input as name.
    pub fn decode(raw: &str) -> Self {
        match raw.split_once(KIND_SEPARATOR) {
            Some((kind, name)) => Self {
                kind: kind.into(),
                name: name.into(),
            },
            None => Self {
                kind: CompactString::default(),
                name: raw.into(),
            },
        }
    }

    /// Inverse of [`SlotId::decode`] for every kind that contains no
    /// separator: an empty kind encodes as the bare name.
    pub fn encode(&self) -> String {
        if self.kind.is_empty() {
            self.name.to_string()
        } else {
            format!("{}{}{}", self.kind, KIND_SEPARATOR, self.name)
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_kind(&self) -> bool {
        !self.kind.is_empty()
    }

    /// Host-facing label: the kind alone for pure panel slots (`tree::`),
    /// the full identifier otherwise.
    pub fn label(&self) -> String {
        if self.name.is_empty() && !self.kind.is_empty() {
            self.kind.to_string()
        } else {
            self.encode()
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}{}", self.kind, KIND_SEPARATOR, self.name)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/slot.rs"]
mod tests;
