//! Typed command-line option values.
//!
//! An [`Opt`] is one declared option: a canonical name plus aliases, one of
//! seven value [`Kind`]s, help metadata, and an optional caller-owned
//! [`Dest`] cell the parsed value is written into.
//!
//! - `save(&[token, ...])` converts raw tokens and stores the result, or
//!   returns an [`Error`] and leaves everything untouched
//! - typed accessors (`int()`, `string_map()`, ...) read through to the
//!   destination
//! - error wording comes from a replaceable [`Catalog`]
//!
//! Tokenizing `argv`, looking options up by name and rendering help are left
//! to the caller.

pub mod cell;
pub mod convert;
mod error;
pub mod option;
pub mod text;

pub use cell::{Dest, Value};
pub use error::{Error, Result};
pub use option::{sort, Kind, Opt};
pub use text::Catalog;
