mod flags;
mod offsets;

pub use self::flags::Flags;
pub use self::offsets::{Offsets, ParenPair, SubjectBounds};

/// The identifier reported by the adapter for introspection.
pub const ENGINE_NAME: &str = "re::engine::Regex";
