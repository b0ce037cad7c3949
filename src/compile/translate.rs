use crate::common::Flags;

/// The pattern `\s+`, split on runs of whitespace.
const WHITESPACE_RUN: &str = r"\s+";

/// A host pattern translated into the backing engine's syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    /// The pattern wrapped in an inline-flag group.
    pub wrapped: String,
    /// Length of the inline-flag prefix in front of the original pattern.
    pub pre_prefix: usize,
    /// The host flags plus the quirk flags inferred from the pattern shape.
    pub extflags: Flags,
    /// The backing engine cannot honor the request at all.
    pub perl_only: bool,
}

impl Translation {
    /// Translate `pattern` compiled with `flags`.
    pub fn new(pattern: &str, flags: Flags) -> Self {
        let wrapped = wrap(pattern, flags);
        let pre_prefix = wrapped.len() - pattern.len() - 1;

        Translation {
            wrapped,
            pre_prefix,
            extflags: flags | quirks(pattern, flags),
            perl_only: flags.contains(Flags::EXTENDED),
        }
    }
}

/// Wrap `pattern` in a group carrying the fold, multiline and dot-all flags.
///
/// Set flags become positive modifiers; once any flag is set, the unset ones
/// follow a `-`. Without any flag set the group is a plain `(?:...)`.
pub fn wrap(pattern: &str, flags: Flags) -> String {
    let mut set = String::new();
    let mut unset = String::new();

    for &(flag, letter) in Flags::INLINE.iter() {
        if flags.contains(flag) {
            set.push(letter)
        } else {
            unset.push(letter)
        }
    }

    let mut wrapped = String::with_capacity(pattern.len() + 9);

    wrapped.push_str("(?");
    wrapped.push_str(&set);
    if !set.is_empty() && !unset.is_empty() {
        wrapped.push('-');
        wrapped.push_str(&unset);
    }
    wrapped.push(':');
    wrapped.push_str(pattern);
    wrapped.push(')');

    wrapped
}

/// Infer the split quirks the host applies to a few exact pattern shapes.
pub fn quirks(pattern: &str, flags: Flags) -> Flags {
    match pattern {
        " " if flags.contains(Flags::SPLIT) => Flags::SKIPWHITE | Flags::WHITE,
        "" => Flags::NULL,
        "^" => Flags::START_ONLY,
        WHITESPACE_RUN => Flags::WHITE,
        _ => Flags::empty(),
    }
}
