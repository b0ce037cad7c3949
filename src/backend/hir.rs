use regex_syntax::{
    hir::{Capture, Class, ClassBytes, ClassBytesRange, ClassUnicode, ClassUnicodeRange, Hir, HirKind, Repetition},
    ParserBuilder,
};

use crate::backend::{BackendError, Options};

/// Parse pattern text into the syntax tree the programs are built from.
pub fn parse(pattern: &str, options: &Options) -> Result<Hir, BackendError> {
    let hir = ParserBuilder::new()
        .case_insensitive(!options.case_sensitive)
        .unicode(options.utf8)
        .utf8(options.utf8)
        .build()
        .parse(pattern)
        .map_err(|err| BackendError::Syntax(err.to_string()))?;

    Ok(if options.never_nl { never_nl(hir) } else { hir })
}

/// Rewrite `hir` so that no part of it can consume a `\n`.
///
/// Classes lose the newline, and a literal spelling one out can never match.
pub fn never_nl(hir: Hir) -> Hir {
    match hir.into_kind() {
        HirKind::Empty => Hir::empty(),
        HirKind::Literal(lit) => {
            if lit.0.contains(&b'\n') {
                Hir::fail()
            } else {
                Hir::literal(lit.0)
            }
        }
        HirKind::Class(Class::Unicode(mut cls)) => {
            cls.difference(&ClassUnicode::new(vec![ClassUnicodeRange::new('\n', '\n')]));
            Hir::class(Class::Unicode(cls))
        }
        HirKind::Class(Class::Bytes(mut cls)) => {
            cls.difference(&ClassBytes::new(vec![ClassBytesRange::new(b'\n', b'\n')]));
            Hir::class(Class::Bytes(cls))
        }
        HirKind::Look(look) => Hir::look(look),
        HirKind::Repetition(Repetition { min, max, greedy, sub }) => Hir::repetition(Repetition {
            min,
            max,
            greedy,
            sub: Box::new(never_nl(*sub)),
        }),
        HirKind::Capture(Capture { index, name, sub }) => Hir::capture(Capture {
            index,
            name,
            sub: Box::new(never_nl(*sub)),
        }),
        HirKind::Concat(subs) => Hir::concat(subs.into_iter().map(never_nl).collect()),
        HirKind::Alternation(subs) => Hir::alternation(subs.into_iter().map(never_nl).collect()),
    }
}
