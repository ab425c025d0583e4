//! Ordered header storage with single- and multi-value disciplines.
//!
//! A name lives in at most one of the two stores at any time; trying to use
//! it under the other discipline fails with
//! [`Error::HeaderKindConflict`](crate::Error::HeaderKindConflict). Iteration
//! and wire serialization emit all single-value entries in insertion order,
//! then every multi-value list in append order.

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Maximum inline headers before heap allocation.
///
/// Most requests carry well under 16 headers, so the common case stays on the
/// stack and lookups are plain linear scans.
pub const MAX_INLINE_HEADERS: usize = 16;

type SingleVec = SmallVec<[(String, String); MAX_INLINE_HEADERS]>;
type MultiVec = SmallVec<[(String, Vec<String>); 4]>;

/// Ordered header collection backing both request and response messages.
///
/// Names are case-sensitive as given; no canonicalization is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    single: SingleVec,
    multi: MultiVec,
}

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a single-value header.
    ///
    /// Fails with `HeaderKindConflict` if `name` is already a multi-value
    /// header. Overwriting keeps the original insertion position.
    pub fn set_single(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if self.multi.iter().any(|(n, _)| *n == name) {
            return Err(Error::HeaderKindConflict { name });
        }
        let value = value.into();
        match self.single.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.single.push((name, value)),
        }
        Ok(self)
    }

    /// Look up a single-value header.
    #[must_use]
    pub fn get_single(&self, name: &str) -> Option<&str> {
        self.single
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a single-value header; no-op if absent.
    pub fn delete_single(&mut self, name: &str) -> &mut Self {
        self.single.retain(|(n, _)| n.as_str() != name);
        self
    }

    /// Append a value to a multi-value header, creating the list on first use.
    ///
    /// Fails with `HeaderKindConflict` if `name` is already a single-value
    /// header.
    pub fn add_multi(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if self.single.iter().any(|(n, _)| *n == name) {
            return Err(Error::HeaderKindConflict { name });
        }
        let value = value.into();
        match self.multi.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.multi.push((name, vec![value])),
        }
        Ok(self)
    }

    /// Iterate the values of one multi-value header in append order.
    ///
    /// Empty iterator if the name is absent (or single-valued).
    pub fn multi_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.multi
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .into_iter()
            .flat_map(|(_, values)| values.iter().map(String::as_str))
    }

    /// Remove a whole multi-value list; no-op if absent.
    pub fn delete_multi(&mut self, name: &str) -> &mut Self {
        self.multi.retain(|(n, _)| n.as_str() != name);
        self
    }

    /// Iterate every `(name, value)` pair: single-value entries first in
    /// insertion order, then each multi-value list in append order.
    ///
    /// The iterator is lazy, finite, and restartable.
    pub fn iter_all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.single
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .chain(
                self.multi
                    .iter()
                    .flat_map(|(n, values)| values.iter().map(move |v| (n.as_str(), v.as_str()))),
            )
    }

    /// Number of `(name, value)` pairs across both stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.single.len() + self.multi.iter().map(|(_, vs)| vs.len()).sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.multi.is_empty()
    }

    /// Render every pair as `Name: value\r\n`, concatenated in iteration
    /// order.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter_all() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        out
    }
}
