use crate::{common::Flags, compile::CompileContext, errors::Result, runtime::Captured};

/// The contract a pattern engine fulfils for the host.
///
/// The host compiles a pattern once, runs it against subjects, reads the captures
/// through [`Captured`], and duplicates or frees the pattern object as it needs.
pub trait Engine {
    /// The compiled pattern object.
    type Regexp: Captured;

    /// Compile `pattern` with the host `flags` under the hints resolved into `ctx`.
    fn compile(&self, pattern: &str, flags: Flags, ctx: &CompileContext) -> Result<Self::Regexp>;

    /// Search `subject[start..end]` from the absolute offset `from`.
    fn exec(
        &self,
        rx: &mut Self::Regexp,
        subject: &[u8],
        start: usize,
        end: usize,
        from: usize,
        min_end: usize,
    ) -> bool;

    /// Suggest where a match could start, so the host can skip ahead.
    ///
    /// `None` means no optimization hint is available.
    fn intuit(&self, _rx: &Self::Regexp, _subject: &[u8], _from: usize, _end: usize) -> Option<usize> {
        None
    }

    /// A literal substring every match must contain, if any.
    fn checkstr(&self, _rx: &Self::Regexp) -> Option<Vec<u8>> {
        None
    }

    /// Release a pattern object and everything it holds.
    fn free(&self, rx: Self::Regexp) {
        drop(rx)
    }

    /// Make an independent copy of a pattern object for another execution context.
    fn dupe(&self, rx: &Self::Regexp) -> Result<Self::Regexp>;

    /// The name of the engine that governs `rx`.
    fn package(&self, rx: &Self::Regexp) -> &'static str;
}
