mod compiler;
pub mod options;
mod translate;

pub use self::compiler::Rejection;
pub use self::options::{CompileContext, HintValue, Hints, ScopedHints};
pub use self::translate::{quirks, wrap, Translation};
