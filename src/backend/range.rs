use std::collections::{HashMap, HashSet, VecDeque};

use regex_automata::{
    dfa::{dense, Automaton, StartKind},
    nfa::thompson,
    util::primitives::StateID,
    Anchored, Input, MatchKind,
};
use regex_syntax::hir::Hir;

use crate::backend::Options;

/// How many times a DFA state may be revisited while walking a bound.
///
/// Zero means only the first copy of an infinitely repeated element is considered.
const MAX_REPETITIONS: usize = 0;

/// Compute `(min, max)` such that any anchored match `s` satisfies `min <= s <= max`,
/// looking at no more than `max_len` bytes.
///
/// Returns `None` when no useful bound exists, e.g. when any string can match or
/// the DFA could not be built within the memory budget.
pub fn possible_match_range(hir: &Hir, options: &Options, max_len: usize) -> Option<(Vec<u8>, Vec<u8>)> {
    if max_len == 0 {
        return None;
    }

    let dfa = match build(hir, options) {
        Ok(dfa) => dfa,
        Err(err) => {
            debug!("possible match range unavailable, {}", err);
            return None;
        }
    };
    let start = dfa
        .start_state_forward(&Input::new("").anchored(Anchored::Yes))
        .ok()?;
    let graph = Graph::explore(&dfa, start);

    if !graph.live.contains(&start) {
        // nothing can match
        return Some((vec![], vec![]));
    }

    let min = graph.walk(&dfa, start, max_len, (0..=255).collect::<Vec<u8>>(), true).0;
    let (max, finished) = graph.walk(&dfa, start, max_len, (0..=255).rev().collect::<Vec<u8>>(), false);

    if finished {
        return Some((min, max));
    }

    // stopped while still extending, round `aaaa` up to `aaab`
    let max = prefix_successor(max);

    if max.is_empty() {
        None
    } else {
        Some((min, max))
    }
}

fn build(hir: &Hir, options: &Options) -> Result<dense::DFA<Vec<u32>>, String> {
    let limit = options.max_mem();
    let nfa = thompson::Compiler::new()
        .configure(thompson::Config::new().utf8(options.utf8).nfa_size_limit(Some(limit)))
        .build_from_hir(hir)
        .map_err(|err| err.to_string())?;

    dense::Builder::new()
        .configure(
            dense::Config::new()
                .match_kind(MatchKind::All)
                .start_kind(StartKind::Anchored)
                .dfa_size_limit(Some(limit))
                .determinize_size_limit(Some(limit)),
        )
        .build_from_nfa(&nfa)
        .map_err(|err| err.to_string())
}

/// The states reachable from the start, split by whether a match is still possible.
struct Graph {
    /// States where the bytes consumed so far form a complete match.
    accepting: HashSet<StateID>,
    /// States from which some continuation still reaches an accepting state.
    live: HashSet<StateID>,
}

impl Graph {
    fn explore(dfa: &dense::DFA<Vec<u32>>, start: StateID) -> Self {
        let mut seen = HashSet::new();
        let mut reverse: HashMap<StateID, Vec<StateID>> = HashMap::new();
        let mut queue = VecDeque::new();

        seen.insert(start);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            for byte in 0..=255u8 {
                let next = dfa.next_state(id, byte);

                if dfa.is_dead_state(next) || dfa.is_quit_state(next) {
                    continue;
                }

                reverse.entry(next).or_default().push(id);

                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let accepting: HashSet<StateID> = seen
            .iter()
            .copied()
            .filter(|&id| dfa.is_match_state(dfa.next_eoi_state(id)))
            .collect();

        let mut live = accepting.clone();
        let mut queue: VecDeque<StateID> = accepting.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            for &prev in reverse.get(&id).into_iter().flatten() {
                if live.insert(prev) {
                    queue.push_back(prev);
                }
            }
        }

        Graph { accepting, live }
    }

    /// Follow the first live transition in `order` from each state.
    ///
    /// Returns the bytes consumed and whether the walk ran out of transitions,
    /// as opposed to being cut short by `max_len` or a revisited state.
    fn walk(
        &self,
        dfa: &dense::DFA<Vec<u32>>,
        start: StateID,
        max_len: usize,
        order: Vec<u8>,
        stop_at_match: bool,
    ) -> (Vec<u8>, bool) {
        let mut visited: HashMap<StateID, usize> = HashMap::new();
        let mut bytes = vec![];
        let mut id = start;

        for _ in 0..max_len {
            let seen = visited.entry(id).or_insert(0);

            if *seen > MAX_REPETITIONS {
                return (bytes, false);
            }
            *seen += 1;

            if stop_at_match && self.accepting.contains(&id) {
                return (bytes, true);
            }

            match order
                .iter()
                .map(|&byte| (byte, dfa.next_state(id, byte)))
                .find(|(_, next)| self.live.contains(next))
            {
                Some((byte, next)) => {
                    bytes.push(byte);
                    id = next;
                }
                None => return (bytes, true),
            }
        }

        (bytes, false)
    }
}

/// The smallest string greater than every string prefixed by `prefix`.
///
/// Trailing `0xff` bytes cannot be incremented and are dropped; an all-`0xff`
/// prefix has no successor and yields the empty string.
fn prefix_successor(mut prefix: Vec<u8>) -> Vec<u8> {
    while let Some(last) = prefix.pop() {
        if last != 0xff {
            prefix.push(last + 1);
            return prefix;
        }
    }

    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::hir;

    fn range(pattern: &str, max_len: usize) -> Option<(Vec<u8>, Vec<u8>)> {
        let options = Options::default();

        possible_match_range(&hir::parse(pattern, &options).unwrap(), &options, max_len)
    }

    #[test]
    fn test_prefix_successor() {
        assert_eq!(prefix_successor(b"abc".to_vec()), b"abd");
        assert_eq!(prefix_successor(b"ab\xff\xff".to_vec()), b"ac");
        assert_eq!(prefix_successor(b"\xff\xff".to_vec()), b"");
        assert_eq!(prefix_successor(vec![]), b"");
    }

    #[test]
    fn test_literal_range() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(range("abc", 10), Some((b"abc".to_vec(), b"abc".to_vec())));
        assert_eq!(range("abc|abd", 10), Some((b"abc".to_vec(), b"abd".to_vec())));
    }

    #[test]
    fn test_truncated_range() {
        let (min, max) = range("abcdef", 3).unwrap();

        assert_eq!(min, b"abc");
        assert_eq!(max, b"abd");
    }

    #[test]
    fn test_repetition_range() {
        let (min, max) = range("a+", 10).unwrap();

        assert_eq!(min, b"a");
        assert!(max.starts_with(b"a"));
        assert!(min.as_slice() <= &b"aaaaaaaa"[..] && &b"aaaaaaaa"[..] <= max.as_slice());
    }

    #[test]
    fn test_unbounded_range() {
        assert_eq!(range("(?s).*", 10), None);
        assert_eq!(range("abc", 0), None);
    }

    #[test]
    fn test_impossible_range() {
        assert_eq!(range(r"[a&&b]", 10), Some((vec![], vec![])));
    }
}
