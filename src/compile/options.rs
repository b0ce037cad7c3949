//! Compile hints read from the host's lexically scoped hint store.
use std::collections::{BTreeMap, HashMap};

use crate::backend::Options;
use crate::common::Flags;

/// Hint naming the memory budget of the backing engine, in bytes.
pub const MAX_MEM: &str = "max-mem";
/// Hint enabling leftmost-longest matching.
pub const LONGEST_MATCH: &str = "longest-match";
/// Hint forbidding matches that consume a newline.
pub const NEVER_NL: &str = "never-nl";
/// Hint turning a refused pattern into a compile error instead of a fallback.
pub const STRICT: &str = "strict";

/// A value stored in the host's scoped hint store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintValue {
    /// Present but undefined; treated like an absent hint.
    Undef,
    /// A boolean hint.
    Bool(bool),
    /// An integer hint.
    Int(i64),
    /// A string hint, interpreted the way the host interprets scalars.
    Str(String),
}

impl HintValue {
    /// Whether the value is defined at all.
    pub fn is_defined(&self) -> bool {
        !matches!(self, HintValue::Undef)
    }

    /// Host truthiness: `0`, `""`, `"0"` and undef are false.
    pub fn is_true(&self) -> bool {
        match self {
            HintValue::Undef => false,
            HintValue::Bool(b) => *b,
            HintValue::Int(n) => *n != 0,
            HintValue::Str(s) => !s.is_empty() && s != "0",
        }
    }

    /// Integer value, reading the leading digits of a string.
    pub fn as_int(&self) -> i64 {
        match self {
            HintValue::Undef => 0,
            HintValue::Bool(b) => *b as i64,
            HintValue::Int(n) => *n,
            HintValue::Str(s) => {
                let s = s.trim_start();
                let sign_len = if s.starts_with('-') || s.starts_with('+') { 1 } else { 0 };
                let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();

                s[..sign_len + digits].parse().unwrap_or(0)
            }
        }
    }
}

impl From<bool> for HintValue {
    fn from(b: bool) -> Self {
        HintValue::Bool(b)
    }
}

impl From<i64> for HintValue {
    fn from(n: i64) -> Self {
        HintValue::Int(n)
    }
}

impl From<&str> for HintValue {
    fn from(s: &str) -> Self {
        HintValue::Str(s.to_owned())
    }
}

/// Lookup into the hints in effect where a pattern is compiled.
pub trait Hints {
    /// Fetch the hint stored under `key`, if any.
    fn fetch(&self, key: &str) -> Option<HintValue>;
}

impl Hints for HashMap<String, HintValue> {
    fn fetch(&self, key: &str) -> Option<HintValue> {
        self.get(key).cloned()
    }
}

impl Hints for BTreeMap<String, HintValue> {
    fn fetch(&self, key: &str) -> Option<HintValue> {
        self.get(key).cloned()
    }
}

impl<T: Hints + ?Sized> Hints for &T {
    fn fetch(&self, key: &str) -> Option<HintValue> {
        (**self).fetch(key)
    }
}

/// A stack of lexical scopes, the innermost scope winning.
///
/// Leaving a scope restores whatever the enclosing scopes had set.
#[derive(Clone, Debug)]
pub struct ScopedHints {
    scopes: Vec<HashMap<String, HintValue>>,
}

impl Default for ScopedHints {
    fn default() -> Self {
        ScopedHints {
            scopes: vec![HashMap::new()],
        }
    }
}

impl ScopedHints {
    /// Create a store with a single, outermost scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested scope.
    pub fn enter(&mut self) -> &mut Self {
        self.scopes.push(HashMap::new());
        self
    }

    /// Close the innermost scope; the outermost scope is never closed.
    pub fn leave(&mut self) -> &mut Self {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        self
    }

    /// Set a hint in the innermost scope.
    pub fn set<K: Into<String>, V: Into<HintValue>>(&mut self, key: K, value: V) -> &mut Self {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
        self
    }

    /// The number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Hints for ScopedHints {
    fn fetch(&self, key: &str) -> Option<HintValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key).cloned())
    }
}

/// Compile options resolved from the hints in effect for one pattern.
///
/// Only a present and true hint changes behaviour; an absent hint and an
/// explicit false or zero both leave the backing engine defaults alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileContext {
    max_mem: Option<usize>,
    longest_match: bool,
    never_nl: bool,
    strict: bool,
}

impl CompileContext {
    /// A context with every option unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the recognized hints out of `hints`.
    pub fn resolve<H: Hints + ?Sized>(hints: &H) -> Self {
        let truthy = |key: &str| hints.fetch(key).map_or(false, |v| v.is_defined() && v.is_true());

        let ctx = CompileContext {
            max_mem: hints
                .fetch(MAX_MEM)
                .filter(HintValue::is_defined)
                .map(|v| v.as_int())
                .filter(|&n| n > 0)
                .map(|n| n as usize),
            longest_match: truthy(LONGEST_MATCH),
            never_nl: truthy(NEVER_NL),
            strict: truthy(STRICT),
        };

        trace!("resolved compile context {:?}", ctx);

        ctx
    }

    /// Set the memory budget of the backing engine.
    pub fn max_mem(&mut self, bytes: usize) -> &mut Self {
        self.max_mem = if bytes > 0 { Some(bytes) } else { None };
        self
    }

    /// Set leftmost-longest matching.
    pub fn longest_match(&mut self, yes: bool) -> &mut Self {
        self.longest_match = yes;
        self
    }

    /// Set whether matches may never consume a newline.
    pub fn never_nl(&mut self, yes: bool) -> &mut Self {
        self.never_nl = yes;
        self
    }

    /// Set whether a refused pattern is a compile error instead of a fallback.
    pub fn strict(&mut self, yes: bool) -> &mut Self {
        self.strict = yes;
        self
    }

    /// Whether refused patterns are fatal.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The backing engine options for a pattern compiled with `flags`.
    pub fn options(&self, flags: Flags) -> Options {
        Options {
            case_sensitive: !flags.contains(Flags::FOLD),
            utf8: flags.contains(Flags::UTF8),
            max_mem: self.max_mem,
            longest_match: self.longest_match,
            never_nl: self.never_nl,
        }
    }
}
