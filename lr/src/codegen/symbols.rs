use std::fmt::{self, Write};
use fnv::FnvHashMap;
use grammar::Grammar;
use crate::IndentWriter;
use super::{EmitError, EmitOptions};

const KEYWORDS: &[&str] = &[
  "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum",
  "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match",
  "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "trait",
  "true", "type", "unsafe", "use", "where", "while", "abstract", "become",
  "box", "do", "final", "macro", "override", "priv", "try", "typeof",
  "unsized", "virtual", "yield",
];

// These cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

pub fn gen<W: Write>(
  grammar: &Grammar,
  options: &EmitOptions,
  out: &mut IndentWriter<W>,
) -> fmt::Result {
  writeln!(out, "/// Symbol indices shared by the scanner and the parser.")?;
  writeln!(out, "#[allow(non_upper_case_globals)]")?;
  writeln!(out, "pub mod {} {{", options.symbols_name)?;
  out.indent();

  writeln!(out, "/* terminals */")?;
  for t in grammar.terminals() {
    writeln!(out, "pub const {}: i32 = {};", const_name(t.name()), t.index())?;
  }

  if options.emit_non_terms {
    writeln!(out)?;
    writeln!(out, "/* non terminals */")?;
    for nt in grammar.non_terminals() {
      writeln!(out, "pub const {}: i32 = {};", const_name(nt.name()), nt.index())?;
    }
  }

  out.dedent();
  writeln!(out, "}}")
}

/// Fails if two symbols written by [`gen`] would get the same constant.
pub fn check_names(grammar: &Grammar, options: &EmitOptions) -> Result<(), EmitError> {
  let mut seen = FnvHashMap::<String, &str>::default();

  let terminals = grammar.terminals().iter().map(|t| t.name());
  let non_terminals = grammar.non_terminals().iter()
    .filter(|_| options.emit_non_terms)
    .map(|nt| nt.name());

  for name in terminals.chain(non_terminals) {
    if let Some(first) = seen.insert(const_name(name), name) {
      return Err(EmitError::DuplicateConstant {
        constant: const_name(name),
        first: first.to_owned(),
        second: name.to_owned(),
      });
    }
  }

  Ok(())
}

/// Name of the constant for a symbol. The case is kept; characters that
/// cannot appear in an identifier become `_`, and keywords are escaped.
pub fn const_name(name: &str) -> String {
  let name = name.chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
    .collect::<String>();

  if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
    format!("_{}", name)
  } else if RESERVED.contains(&name.as_str()) {
    format!("{}_", name)
  } else if KEYWORDS.contains(&name.as_str()) {
    format!("r#{}", name)
  } else {
    name
  }
}
