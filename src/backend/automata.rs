use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use regex_automata::{
    meta::{self, Regex},
    util::primitives::NonMaxUsize,
    Anchored, Input, MatchKind, PatternID,
};
use regex_syntax::hir::Hir;

use crate::backend::{hir, range, Backend, BackendError, Options, Program};

/// The backing matcher built on the `regex-automata` meta regex engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexBackend;

impl Backend for RegexBackend {
    type Program = RegexProgram;

    fn compile(&self, pattern: &str, options: &Options) -> Result<RegexProgram, BackendError> {
        let hir = hir::parse(pattern, options)?;
        let leftmost = build(&hir, options, MatchKind::LeftmostFirst)?;
        let longest = if options.longest_match {
            Some(Searcher::new(build(&hir, options, MatchKind::All)?))
        } else {
            None
        };

        Ok(RegexProgram {
            options: options.clone(),
            hir,
            leftmost: Searcher::new(leftmost),
            longest,
        })
    }
}

fn build(hir: &Hir, options: &Options, kind: MatchKind) -> Result<Regex, BackendError> {
    let limit = options.max_mem();

    meta::Builder::new()
        .configure(
            meta::Config::new()
                .match_kind(kind)
                .utf8_empty(options.utf8)
                .nfa_size_limit(Some(limit))
                .onepass_size_limit(Some(limit))
                .dfa_size_limit(Some(limit))
                .hybrid_cache_capacity(limit),
        )
        .build_from_hir(hir)
        .map_err(|err| BackendError::Build(err.to_string()))
}

/// A regex with its own search cache and slot buffer.
struct Searcher {
    re: Regex,
    cache: meta::Cache,
    slots: Vec<Option<NonMaxUsize>>,
}

impl Searcher {
    fn new(re: Regex) -> Self {
        let cache = re.create_cache();
        let slots = vec![None; re.group_info().slot_len()];

        Searcher { re, cache, slots }
    }

    fn search(&mut self, input: &Input<'_>) -> bool {
        self.re
            .search_slots_with(&mut self.cache, input, &mut self.slots)
            .is_some()
    }

    fn span(&self, group: usize) -> Option<Range<usize>> {
        match (self.slots.get(group * 2)?, self.slots.get(group * 2 + 1)?) {
            (Some(start), Some(end)) => Some(start.get()..end.get()),
            _ => None,
        }
    }
}

/// A program compiled by [`RegexBackend`].
pub struct RegexProgram {
    options: Options,
    hir: Hir,
    leftmost: Searcher,
    longest: Option<Searcher>,
}

impl fmt::Debug for RegexProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexProgram")
            .field("options", &self.options)
            .field("captures", &self.captures_len())
            .finish()
    }
}

impl Program for RegexProgram {
    fn options(&self) -> &Options {
        &self.options
    }

    fn captures_len(&self) -> usize {
        self.leftmost
            .re
            .group_info()
            .group_len(PatternID::ZERO)
            .saturating_sub(1)
    }

    fn named_groups(&self) -> BTreeMap<String, usize> {
        self.leftmost
            .re
            .group_info()
            .pattern_names(PatternID::ZERO)
            .enumerate()
            .filter_map(|(index, name)| name.map(|name| (name.to_owned(), index)))
            .collect()
    }

    fn search(&mut self, haystack: &[u8], from: usize, spans: &mut [Option<Range<usize>>]) -> bool {
        if from > haystack.len() {
            return false;
        }

        if !self.leftmost.search(&Input::new(haystack).range(from..)) {
            return false;
        }

        let searcher = match self.longest {
            Some(ref mut longest) => {
                let start = self.leftmost.span(0).map_or(from, |span| span.start);

                // the leftmost start is shared by every match semantics
                if longest.search(&Input::new(haystack).range(start..).anchored(Anchored::Yes)) {
                    &*longest
                } else {
                    &self.leftmost
                }
            }
            None => &self.leftmost,
        };

        for (group, span) in spans.iter_mut().enumerate() {
            *span = searcher.span(group);
        }

        true
    }

    fn possible_match_range(&self, max_len: usize) -> Option<(Vec<u8>, Vec<u8>)> {
        range::possible_match_range(&self.hir, &self.options, max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str, options: Options) -> RegexProgram {
        RegexBackend.compile(pattern, &options).unwrap()
    }

    fn find(program: &mut RegexProgram, haystack: &[u8], from: usize) -> Option<Vec<Option<Range<usize>>>> {
        let mut spans = vec![None; program.captures_len() + 1];

        if program.search(haystack, from, &mut spans) {
            Some(spans)
        } else {
            None
        }
    }

    #[test]
    fn test_captures() {
        let _ = pretty_env_logger::try_init();

        let mut program = compile(r"(?:(?P<key>\w+)=(\d+)|(x))", Options::default());

        assert_eq!(program.captures_len(), 3);
        assert_eq!(program.named_groups().get("key"), Some(&1));
        assert_eq!(program.named_groups().len(), 1);
        assert_eq!(
            find(&mut program, b"  ab=12 ", 0),
            Some(vec![Some(2..7), Some(2..4), Some(5..7), None])
        );
    }

    #[test]
    fn test_search_from() {
        let mut program = compile("foo", Options::default());

        assert_eq!(find(&mut program, b"foo foo", 1), Some(vec![Some(4..7)]));
        assert_eq!(find(&mut program, b"foo foo", 5), None);
        assert_eq!(find(&mut program, b"foo", 4), None);
    }

    #[test]
    fn test_search_sees_context_before_start() {
        let mut program = compile(r"\bbar", Options::default());

        assert_eq!(find(&mut program, b"foobar bar", 3), Some(vec![Some(7..10)]));
    }

    #[test]
    fn test_longest_match() {
        let mut first = compile("a|ab", Options::default());
        let mut longest = compile(
            "a|ab",
            Options {
                longest_match: true,
                ..Options::default()
            },
        );

        assert_eq!(find(&mut first, b"xab", 0), Some(vec![Some(1..2)]));
        assert_eq!(find(&mut longest, b"xab", 0), Some(vec![Some(1..3)]));
        assert!(longest.options().longest_match);
    }

    #[test]
    fn test_never_nl() {
        let options = Options {
            never_nl: true,
            ..Options::default()
        };

        assert_eq!(find(&mut compile("a\nb", options.clone()), b"a\nb", 0), None);
        assert_eq!(find(&mut compile("(?s)a.b", options.clone()), b"a\nb", 0), None);
        assert_eq!(find(&mut compile("(?s)a.b", options), b"a\nb axb", 0), Some(vec![Some(4..7)]));
    }

    #[test]
    fn test_case_insensitive_option() {
        let mut program = compile(
            "abc",
            Options {
                case_sensitive: false,
                ..Options::default()
            },
        );

        assert_eq!(find(&mut program, b"xABC", 0), Some(vec![Some(1..4)]));
    }

    #[test]
    fn test_bytes_and_utf8() {
        let mut bytes = compile("a.c", Options::default());

        assert_eq!(find(&mut bytes, b"a\xffc", 0), Some(vec![Some(0..3)]));

        let mut utf8 = compile(
            r"\w+",
            Options {
                utf8: true,
                ..Options::default()
            },
        );

        assert_eq!(find(&mut utf8, "xé y".as_bytes(), 0), Some(vec![Some(0..3)]));
    }

    #[test]
    fn test_memory_budget() {
        let err = RegexBackend
            .compile(
                r"\w{500}",
                &Options {
                    utf8: true,
                    max_mem: Some(1024),
                    ..Options::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, BackendError::Build(_)));
    }

    #[test]
    fn test_unsupported_syntax() {
        assert!(matches!(
            RegexBackend.compile(r"(a)\1", &Options::default()),
            Err(BackendError::Syntax(_))
        ));
        assert!(matches!(
            RegexBackend.compile(r"a(?=b)", &Options::default()),
            Err(BackendError::Syntax(_))
        ));
    }
}
