//! Grammar symbols and productions for the table emitter.
//!
//! A [`Grammar`] owns every terminal, non-terminal and production of one
//! generation run. Productions are rewritten at construction time so that
//! embedded actions become reductions of synthetic non-terminals, and labels
//! inside action text are turned into parse stack accesses.

use fnv::FnvBuildHasher;
use indexmap::IndexMap;

/// Aborts the run on a broken invariant.
///
/// Specification mistakes go through [`Diagnostics`] instead; this is only
/// for states that a correct caller can never produce.
#[macro_export]
macro_rules! internal_error {
  ($($arg:tt)*) => {
    panic!("internal error: {}", format_args!($($arg)*))
  };
}

mod symbol;
mod production;
mod grammar;
mod label;
mod first;
mod check;
mod diagnostics;

pub use self::symbol::*;
pub use self::production::*;
pub use self::grammar::*;
pub use self::label::{Translator, RESULT_LABEL};
pub use self::diagnostics::*;

pub type Map<K, V> = IndexMap<K, V, FnvBuildHasher>;
pub type HashMap<K, V> = fnv::FnvHashMap<K, V>;

/// Set of terminals, keyed by terminal index.
pub type TerminalSet = bit_set::BitSet;
