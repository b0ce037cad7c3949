use thiserror::Error;

use crate::{
    adapter::RegexEngine,
    backend::{Backend, BackendError},
    common::Flags,
    compile::{CompileContext, Translation},
    engine::Engine,
    errors::Result,
    runtime::{Compiled, Regexp},
};

/// The reason the backing engine did not take a pattern.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    /// Free-spacing mode has no backing engine counterpart.
    #[error("/x is not supported by regex")]
    Extended,

    /// The backing engine failed to compile the wrapped pattern.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl<B: Backend, H: Engine> RegexEngine<B, H> {
    /// Compile `pattern` with the backing engine, handing it over to the host engine
    /// when it is refused and strict mode is off.
    pub fn compile_pattern(
        &self,
        pattern: &str,
        flags: Flags,
        ctx: &CompileContext,
    ) -> Result<Compiled<B::Program, H::Regexp>> {
        let translation = Translation::new(pattern, flags);

        let rejection = if translation.perl_only {
            Rejection::Extended
        } else {
            match self.backend.compile(&translation.wrapped, &ctx.options(flags)) {
                Ok(program) => {
                    debug!("compiled pattern `{}` as `{}`", pattern, translation.wrapped);

                    return Ok(Compiled::Adapter(Regexp::new(program, translation)));
                }
                Err(err) => Rejection::Backend(err),
            }
        };

        if ctx.is_strict() {
            debug!("refused pattern `{}` in strict mode, {}", pattern, rejection);

            return Err(rejection.into());
        }

        debug!("pattern `{}` falls back to the host engine, {}", pattern, rejection);

        self.host.compile(pattern, flags, ctx).map(Compiled::Host)
    }
}
