//! Capture buffer accessors for the host's numbered and named capture variables.
use std::collections::BTreeMap;

use crate::{
    common::{Offsets, SubjectBounds},
    errors::{Error, Result},
};

/// A pattern object that remembers the captures of its last successful match.
pub trait Captured {
    /// The capture offsets, relative to the subject start.
    fn offsets(&self) -> &Offsets;

    /// Map each named group to its index.
    fn paren_names(&self) -> &BTreeMap<String, usize>;

    /// The subject region of the last successful match.
    fn subject_bounds(&self) -> Option<SubjectBounds>;
}

/// Fetch the text captured by group `paren` out of the host buffer `buf`.
///
/// Returns `None` before the first match, for an unknown group, or for a group
/// that did not participate.
pub fn numbered_buff_fetch<'b, R: Captured + ?Sized>(rx: &R, buf: &'b [u8], paren: usize) -> Option<&'b [u8]> {
    let bounds = rx.subject_bounds()?;
    let span = rx.offsets().get(paren)?.range()?;

    buf.get(bounds.absolute(span))
}

/// The length in bytes of the text captured by group `paren`.
pub fn numbered_buff_length<R: Captured + ?Sized>(rx: &R, paren: usize) -> Option<usize> {
    rx.subject_bounds()?;

    rx.offsets().get(paren)?.range().map(|span| span.len())
}

/// Assign to the capture variable of group `paren`.
///
/// Capture variables are read-only, so this always fails.
pub fn numbered_buff_store<R: Captured + ?Sized>(_rx: &R, paren: usize, _value: &[u8]) -> Result<()> {
    debug!("refused to store into capture group {}", paren);

    Err(Error::ReadOnly)
}

/// Fetch the text captured by the group called `name`.
pub fn named_buff_fetch<'b, R: Captured + ?Sized>(rx: &R, buf: &'b [u8], name: &str) -> Option<&'b [u8]> {
    let paren = *rx.paren_names().get(name)?;

    numbered_buff_fetch(rx, buf, paren)
}

/// Whether the pattern declares a group called `name`.
pub fn named_buff_exists<R: Captured + ?Sized>(rx: &R, name: &str) -> bool {
    rx.paren_names().contains_key(name)
}

/// The names of the groups that took part in the last successful match, in name order.
pub fn named_buff_iter<R: Captured + ?Sized>(rx: &R) -> impl Iterator<Item = &str> + '_ {
    let matched = rx.subject_bounds().is_some();

    rx.paren_names()
        .iter()
        .filter(move |&(_, &paren)| matched && rx.offsets().get(paren).map_or(false, |pair| pair.is_set()))
        .map(|(name, _)| name.as_str())
}
