use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::{
    backend::{Backend, BackendError, Program},
    common::{Flags, Offsets, SubjectBounds},
    compile::Translation,
    runtime::Captured,
};

/// A pattern compiled by the backing engine.
///
/// The program handle is owned exclusively; a copy for another execution
/// context is made with [`Regexp::dupe`], which compiles a new handle.
pub struct Regexp<P> {
    pub(crate) program: P,
    extflags: Flags,
    wrapped: String,
    pre_prefix: usize,
    nparens: usize,
    paren_names: BTreeMap<String, usize>,
    pub(crate) offs: Offsets,
    pub(crate) subject: Option<SubjectBounds>,
    pub(crate) spans: Vec<Option<Range<usize>>>,
}

impl<P: Program> Regexp<P> {
    pub(crate) fn new(program: P, translation: Translation) -> Self {
        let Translation {
            wrapped,
            pre_prefix,
            extflags,
            ..
        } = translation;

        Self::with_program(program, extflags, wrapped, pre_prefix)
    }

    fn with_program(program: P, extflags: Flags, wrapped: String, pre_prefix: usize) -> Self {
        let nparens = program.captures_len();
        let paren_names = program.named_groups();

        Regexp {
            program,
            extflags,
            wrapped,
            pre_prefix,
            nparens,
            paren_names,
            offs: Offsets::with_parens(nparens),
            subject: None,
            spans: vec![None; nparens + 1],
        }
    }

    /// Compile an independent copy from the wrapped pattern and the options of this program.
    ///
    /// Capture metadata is read back from the new program, and no match state is shared.
    pub fn dupe<B>(&self, backend: &B) -> Result<Self, BackendError>
    where
        B: Backend<Program = P>,
    {
        let program = backend.compile(&self.wrapped, self.program.options())?;

        debug!("duplicated pattern `{}`", self.wrapped);

        Ok(Self::with_program(program, self.extflags, self.wrapped.clone(), self.pre_prefix))
    }

    /// Returns the minimum and maximum strings an anchored match can start with,
    /// looking at no more than `max_len` bytes.
    ///
    /// Both bounds are empty when the backing engine cannot compute them.
    pub fn possible_match_range(&self, max_len: usize) -> (Vec<u8>, Vec<u8>) {
        self.program.possible_match_range(max_len).unwrap_or_default()
    }
}

impl<P> Regexp<P> {
    /// The backing engine program.
    pub fn program(&self) -> &P {
        &self.program
    }

    /// The host flags plus the inferred split quirks.
    pub fn extflags(&self) -> Flags {
        self.extflags
    }

    /// The exact pattern text handed to the backing engine.
    pub fn wrapped(&self) -> &str {
        &self.wrapped
    }

    /// The original pattern, without the inline-flag group around it.
    pub fn precomp(&self) -> &str {
        &self.wrapped[self.pre_prefix..self.wrapped.len() - 1]
    }

    /// The number of capturing groups.
    pub fn nparens(&self) -> usize {
        self.nparens
    }
}

impl<P> Captured for Regexp<P> {
    fn offsets(&self) -> &Offsets {
        &self.offs
    }

    fn paren_names(&self) -> &BTreeMap<String, usize> {
        &self.paren_names
    }

    fn subject_bounds(&self) -> Option<SubjectBounds> {
        self.subject
    }
}

impl<P> fmt::Debug for Regexp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regexp")
            .field("wrapped", &self.wrapped)
            .field("extflags", &self.extflags)
            .field("nparens", &self.nparens)
            .field("paren_names", &self.paren_names)
            .finish()
    }
}

/// A compiled pattern object: owned by the adapter, or delegated to the host engine.
#[derive(Debug)]
pub enum Compiled<P, R> {
    /// Compiled by the backing engine.
    Adapter(Regexp<P>),
    /// Handed over to the host engine, which governs it from then on.
    Host(R),
}

impl<P, R> Compiled<P, R> {
    /// Indicating that the backing engine compiled the pattern.
    pub fn is_adapter(&self) -> bool {
        matches!(self, Compiled::Adapter(_))
    }

    /// Indicating that the pattern fell back to the host engine.
    pub fn is_host(&self) -> bool {
        matches!(self, Compiled::Host(_))
    }

    /// The adapter-owned pattern, if any.
    pub fn as_adapter(&self) -> Option<&Regexp<P>> {
        match self {
            Compiled::Adapter(rx) => Some(rx),
            Compiled::Host(_) => None,
        }
    }

    /// The host pattern object, if any.
    pub fn as_host(&self) -> Option<&R> {
        match self {
            Compiled::Adapter(_) => None,
            Compiled::Host(rx) => Some(rx),
        }
    }
}

impl<P, R: Captured> Captured for Compiled<P, R> {
    fn offsets(&self) -> &Offsets {
        match self {
            Compiled::Adapter(rx) => rx.offsets(),
            Compiled::Host(rx) => rx.offsets(),
        }
    }

    fn paren_names(&self) -> &BTreeMap<String, usize> {
        match self {
            Compiled::Adapter(rx) => rx.paren_names(),
            Compiled::Host(rx) => rx.paren_names(),
        }
    }

    fn subject_bounds(&self) -> Option<SubjectBounds> {
        match self {
            Compiled::Adapter(rx) => rx.subject_bounds(),
            Compiled::Host(rx) => rx.subject_bounds(),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use crate::backend::{tests::MockBackend, Options, RegexBackend};
    use crate::common::ParenPair;

    use super::*;

    pub fn compile<B: Backend>(backend: &B, pattern: &str, flags: Flags) -> Regexp<B::Program> {
        let translation = Translation::new(pattern, flags);
        let options = Options {
            case_sensitive: !flags.contains(Flags::FOLD),
            ..Options::default()
        };

        Regexp::new(backend.compile(&translation.wrapped, &options).unwrap(), translation)
    }

    #[test]
    fn test_regexp() {
        let _ = pretty_env_logger::try_init();

        let rx = compile(&RegexBackend, r"(?P<year>\d{4})-(?P<month>\d{2})-(\d{2})", Flags::MULTILINE);

        assert_eq!(rx.wrapped(), r"(?m-is:(?P<year>\d{4})-(?P<month>\d{2})-(\d{2}))");
        assert_eq!(rx.precomp(), r"(?P<year>\d{4})-(?P<month>\d{2})-(\d{2})");
        assert_eq!(rx.nparens(), 3);
        assert_eq!(rx.paren_names().get("year"), Some(&1));
        assert_eq!(rx.paren_names().get("month"), Some(&2));
        assert_eq!(rx.offsets().len(), 4);
        assert!(rx.offsets().iter().all(|&pair| pair == ParenPair::UNSET));
        assert_eq!(rx.subject_bounds(), None);
        assert_eq!(rx.extflags(), Flags::MULTILINE);
    }

    #[test]
    fn test_dupe_is_independent() {
        let backend = MockBackend::default();
        let mut rx = compile(&backend, r"(\w)(\d)?", Flags::FOLD);

        assert!(rx.exec(b"a1", 0, 2, 0, 0));

        let copy = rx.dupe(&backend).unwrap();

        assert_eq!(backend.counters.created.get(), 2);
        assert_eq!(backend.counters.live(), 2);
        assert_eq!(copy.wrapped(), rx.wrapped());
        assert_eq!(copy.program().options(), rx.program().options());
        assert_eq!(copy.nparens(), rx.nparens());
        assert_eq!(copy.paren_names(), rx.paren_names());
        assert_eq!(copy.subject_bounds(), None);
        assert!(copy.offsets().iter().all(|&pair| pair == ParenPair::UNSET));

        drop(rx);

        assert_eq!(backend.counters.live(), 1);

        drop(copy);

        assert_eq!(backend.counters.live(), 0);
    }

    #[test]
    fn test_possible_match_range() {
        let rx = compile(&RegexBackend, "abc", Flags::empty());

        assert_eq!(rx.possible_match_range(10), (b"abc".to_vec(), b"abc".to_vec()));
        assert_eq!(rx.possible_match_range(0), (vec![], vec![]));
    }

    #[test]
    fn test_compiled() {
        let rx: Compiled<_, ()> = Compiled::Adapter(compile(&RegexBackend, "a", Flags::empty()));

        assert!(rx.is_adapter());
        assert!(!rx.is_host());
        assert!(rx.as_adapter().is_some());
        assert!(rx.as_host().is_none());

        let rx: Compiled<crate::backend::RegexProgram, ()> = Compiled::Host(());

        assert!(rx.is_host());
        assert!(rx.as_adapter().is_none());
    }
}
