use crate::{backend::Program, common::SubjectBounds, runtime::Regexp};

impl<P: Program> Regexp<P> {
    /// Search `subject[start..end]` for the pattern, beginning at the absolute offset `from`.
    ///
    /// On success the capture offsets are rewritten relative to `start` and the subject
    /// bounds are recorded. On an ordinary failure nothing is touched; when `from` lies
    /// outside the subject the whole match slot is cleared.
    ///
    /// `min_end` is accepted for the host contract and ignored.
    pub fn exec(&mut self, subject: &[u8], start: usize, end: usize, from: usize, _min_end: usize) -> bool {
        let haystack = match subject.get(start..end) {
            Some(haystack) if start <= from && from <= end => haystack,
            _ => {
                trace!("search from {} outside of subject {}..{}", from, start, end);

                self.offs.clear_match();

                return false;
            }
        };

        if !self.program.search(haystack, from - start, &mut self.spans) {
            return false;
        }

        self.subject = Some(SubjectBounds {
            start,
            len: end - start,
        });

        for (pair, span) in self.offs.iter_mut().zip(self.spans.iter()) {
            *pair = span.clone().into();
        }

        trace!("matched `{}` at {:?}", self.wrapped(), self.offs[0]);

        true
    }
}
