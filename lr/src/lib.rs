//! Emission of LR parse tables.
//!
//! The parse machine is built elsewhere and handed over as a
//! [`ParseActionTable`] and a [`ParseReduceTable`]. This crate encodes both
//! into the integer tables read at parse time, and writes them out as Rust
//! source together with the code running the action of each production.

mod tables;
mod indent_writer;
mod tpl_engine;
pub mod encode;
pub mod codegen;

pub use self::tables::*;
pub use self::indent_writer::IndentWriter;
pub use self::codegen::{emit_parser, emit_symbols, EmitError, EmitOptions, EmittedTables};
