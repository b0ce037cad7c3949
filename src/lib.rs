//! A pattern engine adapter backed by the `regex-automata` matcher.
//!
//! The adapter implements the host's pattern [`Engine`] contract: it translates
//! the host flags into an inline-flag group, compiles the pattern with the backing
//! matcher, and hands the pattern over to the host's native engine whenever the
//! matcher refuses it. Scoped hints tune the backing matcher and can make a
//! refusal fatal instead.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! re-engine-regex = "0.1"
//! ```
//!
//! # Examples
//!
//! ```
//! use re_engine_regex::prelude::*;
//!
//! let engine = RegexEngine::new();
//! let mut hints = ScopedHints::new();
//!
//! hints.set("longest-match", true);
//!
//! let ctx = CompileContext::resolve(&hints);
//! let mut rx = engine.compile("a|ab", Flags::empty(), &ctx).unwrap();
//!
//! assert!(engine.exec(&mut rx, b"xab", 0, 3, 0, 0));
//! assert_eq!(numbered_buff_fetch(&rx, b"xab", 0), Some(&b"ab"[..]));
//!
//! // free-spacing mode is not supported by the backing matcher
//! let rx = engine.compile("a b", Flags::EXTENDED, &ctx).unwrap();
//!
//! assert!(rx.is_host());
//! ```
#![deny(missing_docs, rust_2018_compatibility, rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

#[macro_use]
extern crate log;

mod adapter;
pub mod backend;
mod common;
mod compile;
mod engine;
mod errors;
pub mod host;
mod runtime;

pub use crate::adapter::RegexEngine;
pub use crate::common::{Flags, Offsets, ParenPair, SubjectBounds, ENGINE_NAME};
pub use crate::compile::{
    options as hints, quirks, wrap, CompileContext, HintValue, Hints, Rejection, ScopedHints, Translation,
};
pub use crate::engine::Engine;
pub use crate::errors::{Error, Result};
pub use crate::runtime::{
    named_buff_exists, named_buff_fetch, named_buff_iter, numbered_buff_fetch, numbered_buff_length,
    numbered_buff_store, Captured, Compiled, Regexp,
};

/// The `re-engine-regex` Prelude
pub mod prelude {
    pub use crate::{
        named_buff_fetch, numbered_buff_fetch, Captured, CompileContext, Engine, Flags, RegexEngine, ScopedHints,
    };
}

#[cfg(doctest)]
#[macro_use]
extern crate doc_comment;

#[cfg(doctest)]
doctest!("../README.md");
