use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str;

use fancy_regex::Regex;

use crate::{
    common::{Flags, Offsets, SubjectBounds},
    compile::{quirks, CompileContext},
    engine::Engine,
    errors::{Error, Result},
    runtime::Captured,
};

/// Flags the host engine understands as inline modifiers.
const MODIFIERS: Flags = Flags::from_bits_truncate(
    Flags::FOLD.bits() | Flags::MULTILINE.bits() | Flags::SINGLELINE.bits() | Flags::EXTENDED.bits(),
);

/// The native engine patterns fall back to, built on `fancy-regex`.
///
/// It accepts free-spacing mode, backreferences and look-around. Subjects
/// that are not valid UTF-8 never match.
#[derive(Clone, Copy, Debug, Default)]
pub struct FancyHost;

/// A pattern compiled by [`FancyHost`].
pub struct FancyRegexp {
    regex: Regex,
    extflags: Flags,
    paren_names: BTreeMap<String, usize>,
    offs: Offsets,
    subject: Option<SubjectBounds>,
}

impl FancyRegexp {
    fn new(regex: Regex, extflags: Flags) -> Self {
        let paren_names = regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| name.map(|name| (name.to_owned(), index)))
            .collect();
        let offs = Offsets::with_parens(regex.captures_len().saturating_sub(1));

        FancyRegexp {
            regex,
            extflags,
            paren_names,
            offs,
            subject: None,
        }
    }

    /// The pattern text handed to `fancy-regex`, inline modifiers included.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The host flags plus the inferred split quirks.
    pub fn extflags(&self) -> Flags {
        self.extflags
    }

    /// The number of capturing groups.
    pub fn nparens(&self) -> usize {
        self.offs.len() - 1
    }
}

impl fmt::Debug for FancyRegexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FancyRegexp")
            .field("pattern", &self.as_str())
            .field("extflags", &self.extflags)
            .finish()
    }
}

impl Captured for FancyRegexp {
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

impl Engine for FancyHost {
    type Regexp = FancyRegexp;

    fn compile(&self, pattern: &str, flags: Flags, _ctx: &CompileContext) -> Result<FancyRegexp> {
        let modifiers = (flags & MODIFIERS).to_string();
        let body = named_backrefs(pattern);
        let expr = if modifiers.is_empty() {
            body.into_owned()
        } else {
            format!("(?{}){}", modifiers, body)
        };

        let regex = Regex::new(&expr).map_err(|err| Error::Host(err.to_string()))?;

        debug!("host engine compiled `{}`", expr);

        Ok(FancyRegexp::new(regex, flags | quirks(pattern, flags)))
    }

    fn exec(
        &self,
        rx: &mut FancyRegexp,
        subject: &[u8],
        start: usize,
        end: usize,
        from: usize,
        _min_end: usize,
    ) -> bool {
        let haystack = match subject.get(start..end) {
            Some(haystack) if start <= from && from <= end => haystack,
            _ => {
                rx.offs.clear_match();

                return false;
            }
        };
        let text = match str::from_utf8(haystack) {
            Ok(text) if text.is_char_boundary(from - start) => text,
            _ => return false,
        };

        let caps = match rx.regex.captures_from_pos(text, from - start) {
            Ok(Some(caps)) => caps,
            Ok(None) => return false,
            Err(err) => {
                warn!("host engine gave up on `{}`, {}", rx.as_str(), err);

                return false;
            }
        };

        rx.subject = Some(SubjectBounds {
            start,
            len: end - start,
        });

        for (i, pair) in rx.offs.iter_mut().enumerate() {
            *pair = caps.get(i).map(|m| m.start()..m.end()).into();
        }

        trace!("host engine matched `{}` at {:?}", rx.as_str(), rx.offs[0]);

        true
    }

    fn dupe(&self, rx: &FancyRegexp) -> Result<FancyRegexp> {
        let regex = Regex::new(rx.as_str()).map_err(|err| Error::Host(err.to_string()))?;

        Ok(FancyRegexp::new(regex, rx.extflags))
    }

    fn package(&self, _rx: &FancyRegexp) -> &'static str {
        "fancy-regex"
    }
}

/// Rewrite each numbered backreference `\N` to `\k<name>` when group `N` is named.
///
/// `fancy-regex` refuses numbered backreferences once a pattern has a named group.
fn named_backrefs(pattern: &str) -> Cow<'_, str> {
    let tokens = tokens(pattern);
    let groups: Vec<Option<&str>> = tokens
        .iter()
        .filter(|&&(_, token, in_class)| token == "(" && !in_class)
        .filter_map(|&(off, _, _)| {
            let rest = &pattern[off + 1..];

            if rest.starts_with('?') {
                group_name(rest).map(Some)
            } else {
                Some(None)
            }
        })
        .collect();

    if groups.iter().all(Option::is_none) {
        return Cow::Borrowed(pattern);
    }

    let mut expr = String::with_capacity(pattern.len() + 8);
    let mut skip_to = 0;

    for &(off, token, in_class) in tokens.iter() {
        if off < skip_to {
            continue;
        }

        if !in_class && token.starts_with('\\') {
            let digits = pattern[off + 1..].bytes().take_while(u8::is_ascii_digit).count();
            let name = pattern[off + 1..off + 1 + digits]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| groups.get(n).copied().flatten());

            if let Some(name) = name {
                expr.push_str("\\k<");
                expr.push_str(name);
                expr.push('>');

                skip_to = off + 1 + digits;
                continue;
            }
        }

        expr.push_str(token);
    }

    Cow::Owned(expr)
}

/// The name of the group opened by `rest`, the text following a `(`.
fn group_name(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix("?P<").or_else(|| rest.strip_prefix("?<"))?;

    if rest.starts_with('=') || rest.starts_with('!') {
        return None;
    }

    rest.find('>').map(|end| &rest[..end])
}

/// Split `pattern` into tokens with their byte offsets, marking those inside a bracketed class.
///
/// An escape and the character it escapes form one token.
fn tokens(pattern: &str) -> Vec<(usize, &str, bool)> {
    let mut tokens = vec![];
    let mut in_class = false;
    let mut chars = pattern.char_indices();

    while let Some((off, c)) = chars.next() {
        let end = match c {
            '\\' => chars.next().map_or(pattern.len(), |(off, c)| off + c.len_utf8()),
            _ => off + c.len_utf8(),
        };

        tokens.push((off, &pattern[off..end], in_class));

        match c {
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ => {}
        }
    }

    tokens
}
