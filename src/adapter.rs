use crate::{
    backend::{Backend, RegexBackend},
    common::{Flags, ENGINE_NAME},
    compile::CompileContext,
    engine::Engine,
    errors::Result,
    host::FancyHost,
    runtime::Compiled,
};

/// A pattern engine backed by another matcher, falling back to the host engine
/// for the patterns the matcher refuses.
///
/// # Examples
///
/// ```rust
/// use re_engine_regex::prelude::*;
///
/// let engine = RegexEngine::new();
/// let mut rx = engine.compile("f(o+)", Flags::FOLD, &CompileContext::new()).unwrap();
///
/// assert!(engine.exec(&mut rx, b"xxFOOyy", 0, 7, 0, 0));
/// assert_eq!(numbered_buff_fetch(&rx, b"xxFOOyy", 1), Some(&b"OO"[..]));
/// assert_eq!(engine.package(&rx), "re::engine::Regex");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RegexEngine<B = RegexBackend, H = FancyHost> {
    pub(crate) backend: B,
    pub(crate) host: H,
}

impl RegexEngine {
    /// An engine over the `regex-automata` matcher with `fancy-regex` as the host engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B, H> RegexEngine<B, H> {
    /// Assemble an engine from a backing matcher and a host engine.
    pub fn with_parts(backend: B, host: H) -> Self {
        RegexEngine { backend, host }
    }

    /// The backing matcher.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The host engine patterns fall back to.
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<B: Backend, H: Engine> RegexEngine<B, H> {
    /// Returns the minimum and maximum strings an anchored match can start with,
    /// looking at no more than `max_len` bytes.
    ///
    /// Both bounds are empty when no range is known, including for patterns
    /// handed over to the host engine.
    pub fn possible_match_range(&self, rx: &Compiled<B::Program, H::Regexp>, max_len: usize) -> (Vec<u8>, Vec<u8>) {
        match rx {
            Compiled::Adapter(rx) => rx.possible_match_range(max_len),
            Compiled::Host(_) => (vec![], vec![]),
        }
    }
}

impl<B: Backend, H: Engine> Engine for RegexEngine<B, H> {
    type Regexp = Compiled<B::Program, H::Regexp>;

    fn compile(&self, pattern: &str, flags: Flags, ctx: &CompileContext) -> Result<Self::Regexp> {
        self.compile_pattern(pattern, flags, ctx)
    }

    fn exec(
        &self,
        rx: &mut Self::Regexp,
        subject: &[u8],
        start: usize,
        end: usize,
        from: usize,
        min_end: usize,
    ) -> bool {
        match rx {
            Compiled::Adapter(rx) => rx.exec(subject, start, end, from, min_end),
            Compiled::Host(rx) => self.host.exec(rx, subject, start, end, from, min_end),
        }
    }

    fn intuit(&self, rx: &Self::Regexp, subject: &[u8], from: usize, end: usize) -> Option<usize> {
        match rx {
            Compiled::Adapter(_) => None,
            Compiled::Host(rx) => self.host.intuit(rx, subject, from, end),
        }
    }

    fn checkstr(&self, rx: &Self::Regexp) -> Option<Vec<u8>> {
        match rx {
            Compiled::Adapter(_) => None,
            Compiled::Host(rx) => self.host.checkstr(rx),
        }
    }

    fn free(&self, rx: Self::Regexp) {
        match rx {
            Compiled::Adapter(rx) => {
                trace!("free pattern `{}`", rx.wrapped());
            }
            Compiled::Host(rx) => self.host.free(rx),
        }
    }

    fn dupe(&self, rx: &Self::Regexp) -> Result<Self::Regexp> {
        match rx {
            Compiled::Adapter(rx) => Ok(Compiled::Adapter(rx.dupe(&self.backend)?)),
            Compiled::Host(rx) => self.host.dupe(rx).map(Compiled::Host),
        }
    }

    fn package(&self, rx: &Self::Regexp) -> &'static str {
        match rx {
            Compiled::Adapter(_) => ENGINE_NAME,
            Compiled::Host(rx) => self.host.package(rx),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{tests::MockBackend, Program};
    use crate::common::ParenPair;
    use crate::compile::options::{ScopedHints, LONGEST_MATCH, NEVER_NL};
    use crate::runtime::{numbered_buff_fetch, Captured};

    use super::*;

    #[test]
    fn test_engine() {
        let _ = pretty_env_logger::try_init();

        let engine = RegexEngine::new();
        let mut rx = engine.compile(r"(\w+)@(\w+)", Flags::empty(), &CompileContext::new()).unwrap();

        assert_eq!(engine.package(&rx), ENGINE_NAME);
        assert_eq!(engine.intuit(&rx, b"a@b", 0, 3), None);
        assert_eq!(engine.checkstr(&rx), None);

        assert!(engine.exec(&mut rx, b"mail me@host now", 0, 16, 0, 0));
        assert_eq!(numbered_buff_fetch(&rx, b"mail me@host now", 2), Some(&b"host"[..]));

        engine.free(rx);
    }

    #[test]
    fn test_host_package() {
        let engine = RegexEngine::new();
        let rx = engine.compile("a b", Flags::EXTENDED, &CompileContext::new()).unwrap();

        assert!(rx.is_host());
        assert_eq!(engine.package(&rx), "fancy-regex");
        assert_eq!(engine.possible_match_range(&rx, 10), (vec![], vec![]));
    }

    #[test]
    fn test_dupe_matches_like_original() {
        let engine = RegexEngine::new();
        let mut rx = engine.compile(r"(?P<k>[a-z]+)=(\d+)", Flags::FOLD, &CompileContext::new()).unwrap();
        let mut copy = engine.dupe(&rx).unwrap();

        assert_eq!(copy.as_adapter().unwrap().wrapped(), rx.as_adapter().unwrap().wrapped());
        assert_eq!(copy.paren_names(), rx.paren_names());

        let subject = b"; KEY=42; other=7";

        assert!(engine.exec(&mut rx, subject, 0, subject.len(), 0, 0));
        assert!(engine.exec(&mut copy, subject, 0, subject.len(), 0, 0));
        assert_eq!(copy.offsets(), rx.offsets());
        assert_eq!(rx.offsets()[0], ParenPair::new(2..8));
    }

    #[test]
    fn test_dupe_keeps_options() {
        let mut hints = ScopedHints::new();

        hints.set(LONGEST_MATCH, true).set(NEVER_NL, true);

        let engine = RegexEngine::new();
        let rx = engine.compile("a|ab", Flags::empty(), &CompileContext::resolve(&hints)).unwrap();
        let mut copy = engine.dupe(&rx).unwrap();

        assert_eq!(
            copy.as_adapter().unwrap().program().options(),
            rx.as_adapter().unwrap().program().options()
        );
        assert!(engine.exec(&mut copy, b"xab", 0, 3, 0, 0));
        assert_eq!(copy.offsets()[0], ParenPair::new(1..3));
    }

    #[test]
    fn test_dupe_host_pattern() {
        let engine = RegexEngine::new();
        let rx = engine.compile(r"(a)\1", Flags::empty(), &CompileContext::new()).unwrap();
        let mut copy = engine.dupe(&rx).unwrap();

        assert!(copy.is_host());
        assert!(engine.exec(&mut copy, b"baab", 0, 4, 0, 0));
        assert_eq!(copy.offsets()[0], ParenPair::new(1..3));
    }

    #[test]
    fn test_handle_lifecycle() {
        let engine = RegexEngine::with_parts(MockBackend::default(), FancyHost);
        let counters = engine.backend().counters.clone();
        let ctx = CompileContext::new();

        let rx = engine.compile("abc", Flags::empty(), &ctx).unwrap();
        let copy = engine.dupe(&rx).unwrap();

        assert_eq!(counters.created.get(), 2);
        assert_eq!(counters.live(), 2);

        engine.free(rx);

        assert_eq!(counters.live(), 1);

        let fallback = engine.compile(r"(\w)\1", Flags::empty(), &ctx).unwrap();

        assert!(fallback.is_host());
        assert_eq!(counters.created.get(), 3);
        assert_eq!(counters.live(), 1);

        engine.free(fallback);
        engine.free(copy);

        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn test_possible_match_range() {
        let engine = RegexEngine::new();
        let ctx = CompileContext::new();

        let rx = engine.compile("abc|abd", Flags::empty(), &ctx).unwrap();
        assert_eq!(engine.possible_match_range(&rx, 10), (b"abc".to_vec(), b"abd".to_vec()));

        let rx = engine.compile("(?s).*", Flags::empty(), &ctx).unwrap();
        assert_eq!(engine.possible_match_range(&rx, 10), (vec![], vec![]));
    }
}
