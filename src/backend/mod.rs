//! The capability surface of a backing matcher.
//!
//! The adapter never looks inside a compiled program; it only compiles pattern
//! text with a set of [`Options`], introspects the capture groups, runs
//! unanchored searches and asks for a possible match range.
use std::collections::BTreeMap;
use std::ops::Range;

use thiserror::Error;

mod automata;
mod hir;
mod range;

pub use self::automata::{RegexBackend, RegexProgram};

/// The default `max_mem` budget of the backing engine, in bytes.
pub const DEFAULT_MAX_MEM: usize = 8 << 20;

/// Errors reported by the backing engine when it refuses a pattern.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The pattern is not valid syntax for the backing engine.
    #[error("{0}")]
    Syntax(String),

    /// The pattern parsed but could not be built, e.g. it exceeds the memory budget.
    #[error("{0}")]
    Build(String),
}

/// Options a program is compiled with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Match letters exactly; disabled by the fold flag.
    pub case_sensitive: bool,
    /// Treat the pattern and the subject as UTF-8 text instead of bytes.
    pub utf8: bool,
    /// Upper bound on the memory used by the compiled program.
    pub max_mem: Option<usize>,
    /// Report the leftmost-longest match instead of the leftmost-first one.
    pub longest_match: bool,
    /// Never match a newline, even if the pattern spells one out.
    pub never_nl: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            case_sensitive: true,
            utf8: false,
            max_mem: None,
            longest_match: false,
            never_nl: false,
        }
    }
}

impl Options {
    /// The effective memory budget.
    pub fn max_mem(&self) -> usize {
        self.max_mem.unwrap_or(DEFAULT_MAX_MEM)
    }
}

/// A backing matcher that compiles pattern text into programs.
pub trait Backend {
    /// The compiled program; dropping it releases every resource it holds.
    type Program: Program;

    /// Compile `pattern` with `options`.
    fn compile(&self, pattern: &str, options: &Options) -> Result<Self::Program, BackendError>;
}

/// A compiled program of a backing matcher.
pub trait Program {
    /// The options this program was compiled with.
    fn options(&self) -> &Options;

    /// The number of capturing groups, not counting the whole match.
    fn captures_len(&self) -> usize;

    /// Map each named group to its 1-based group index.
    fn named_groups(&self) -> BTreeMap<String, usize>;

    /// Search `haystack` unanchored, starting at byte offset `from`.
    ///
    /// On success, `spans[i]` holds the span of group `i`, or `None` when the
    /// group did not participate. `spans` is left untouched on failure.
    fn search(&mut self, haystack: &[u8], from: usize, spans: &mut [Option<Range<usize>>]) -> bool;

    /// Compute the minimum and maximum strings an anchored match can start with,
    /// looking at no more than `max_len` bytes.
    fn possible_match_range(&self, max_len: usize) -> Option<(Vec<u8>, Vec<u8>)>;
}
