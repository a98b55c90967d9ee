//! Generation of the parser source and the symbol constant source.

use std::fmt::{self, Write};
use std::io;
use std::time::Instant;
use itertools::Itertools;
use log::{debug, info};
use thiserror::Error;
use grammar::{internal_error, Grammar, ProductionId, TerminalId};
use crate::{encode, tpl_engine, IndentWriter, ParseActionTable, ParseReduceTable};

mod actions;
mod options;
mod symbols;

pub use self::options::EmitOptions;
pub use self::symbols::const_name;

static PARSER_TEMPLATE: &str = include_str!("../templates/parser.tpl.rs");

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to write generated code: {0}")]
  Io(#[from] io::Error),
  #[error("failed to format generated code")]
  Format(#[from] fmt::Error),
  #[error("symbols {first} and {second} both map to the constant {constant}")]
  DuplicateConstant {
    constant: String,
    first: String,
    second: String,
  },
}

/// The tables written into the parser source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedTables {
  pub production_table: Vec<[i32; 2]>,
  pub action_table: Vec<Vec<i32>>,
  pub reduce_table: Vec<Vec<i32>>,
}

/// Writes the parser source to `out`.
///
/// `action_table` is updated with the default reduction of every row when
/// `options.compact_reduces` is set.
pub fn emit_parser<W: io::Write>(
  out: &mut W,
  grammar: &Grammar,
  action_table: &mut ParseActionTable,
  reduce_table: &ParseReduceTable,
  start_state: usize,
  start_production: ProductionId,
  options: &EmitOptions,
) -> Result<EmittedTables, EmitError> {
  check_dimensions(grammar, action_table, reduce_table, start_state, start_production);

  let start_time = Instant::now();

  let tables = EmittedTables {
    production_table: encode::production_table(grammar),
    action_table: encode::action_table(grammar, action_table, options.compact_reduces),
    reduce_table: encode::reduce_table(reduce_table),
  };
  debug!("tables encoded in {:?}", start_time.elapsed());

  let imports = gen_imports(options);
  let production_table = gen_production_table(&tables.production_table)?;
  let encoded_action_table = gen_row_table(&tables.action_table)?;
  let encoded_reduce_table = gen_row_table(&tables.reduce_table)?;
  let parser_code = gen_parser_code(options)?;
  let user_hooks = gen_user_hooks(options)?;
  let actions = {
    let mut out = IndentWriter::new(String::new());
    actions::gen(grammar, start_production, options, &mut out)?;
    out.into_inner()
  };

  let content = tpl_engine::process(PARSER_TEMPLATE, |name| match name {
    "title" => options.title.clone(),
    "imports" => imports.clone(),
    "num_productions" => tables.production_table.len().to_string(),
    "num_states" => tables.action_table.len().to_string(),
    "production_table" => production_table.clone(),
    "action_table" => encoded_action_table.clone(),
    "reduce_table" => encoded_reduce_table.clone(),
    "parser_name" => options.parser_name.clone(),
    "pre" => grammar.prefix().to_owned(),
    "runtime" => options.runtime_crate.clone(),
    "parser_code" => parser_code.clone(),
    "start_state" => start_state.to_string(),
    "start_production" => start_production.id().to_string(),
    "eof" => TerminalId::EOF.id().to_string(),
    "error" => TerminalId::ERROR.id().to_string(),
    "user_hooks" => user_hooks.clone(),
    "actions" => actions.clone(),
    _ => internal_error!("unknown parameter {} in parser template", name),
  });

  out.write_all(wrap_module(&content, options)?.as_bytes())?;

  info!("parser {} emitted in {:?}", options.parser_name, start_time.elapsed());

  Ok(tables)
}

/// Writes the symbol constant source to `out`.
pub fn emit_symbols<W: io::Write>(
  out: &mut W,
  grammar: &Grammar,
  options: &EmitOptions,
) -> Result<(), EmitError> {
  symbols::check_names(grammar, options)?;

  let start_time = Instant::now();

  let mut content = IndentWriter::new(String::new());
  writeln!(content, "//----------------------------------------------------")?;
  writeln!(content, "// The following code was generated by {}", options.title)?;
  writeln!(content, "//----------------------------------------------------")?;
  writeln!(content)?;
  symbols::gen(grammar, options, &mut content)?;

  out.write_all(wrap_module(&content.into_inner(), options)?.as_bytes())?;

  info!("symbols {} emitted in {:?}", options.symbols_name, start_time.elapsed());

  Ok(())
}

fn check_dimensions(
  grammar: &Grammar,
  action_table: &ParseActionTable,
  reduce_table: &ParseReduceTable,
  start_state: usize,
  start_production: ProductionId,
) {
  if action_table.num_terminals() != grammar.terminals().len() {
    internal_error!("action table has {} columns for {} terminals",
      action_table.num_terminals(), grammar.terminals().len());
  }
  if reduce_table.num_non_terminals() != grammar.non_terminals().len() {
    internal_error!("reduce table has {} columns for {} non terminals",
      reduce_table.num_non_terminals(), grammar.non_terminals().len());
  }
  if action_table.num_states() != reduce_table.num_states() {
    internal_error!("action table has {} states, reduce table has {}",
      action_table.num_states(), reduce_table.num_states());
  }
  if start_state >= action_table.num_states() {
    internal_error!("start state {} out of range", start_state);
  }
  if start_production.index() >= grammar.productions().len() {
    internal_error!("start production {} out of range", start_production.id());
  }
}

fn wrap_module(content: &str, options: &EmitOptions) -> Result<String, fmt::Error> {
  let name = match &options.module_name {
    Some(name) => name,
    None => return Ok(content.to_owned()),
  };

  let mut out = IndentWriter::new(String::new());
  writeln!(out, "{}", actions::ALLOW)?;
  writeln!(out, "pub mod {} {{", name)?;
  out.indent();
  write!(out, "{}", content)?;
  out.dedent();
  writeln!(out, "}}")?;
  Ok(out.into_inner())
}

fn gen_imports(options: &EmitOptions) -> String {
  if options.imports.is_empty() {
    return String::new();
  }

  let mut imports = "\n".to_owned();
  for path in &options.imports {
    imports.push_str(&format!("use {};\n", path));
  }
  imports
}

fn gen_parser_code(options: &EmitOptions) -> Result<String, fmt::Error> {
  let code = match &options.parser_code {
    Some(code) => code,
    None => return Ok(String::new()),
  };

  let mut out = IndentWriter::new(String::new());
  out.indent();
  writeln!(out)?;
  writeln!(out, "{}", code.trim())?;
  Ok(out.into_inner())
}

fn gen_user_hooks(options: &EmitOptions) -> Result<String, fmt::Error> {
  let rt = &options.runtime_crate;
  let mut out = IndentWriter::new(String::new());
  out.indent();

  if let Some(code) = &options.init_code {
    writeln!(out)?;
    writeln!(out, "fn user_init(&mut self) -> ::std::result::Result<(), {}::Error> {{", rt)?;
    out.indent();
    writeln!(out, "{}", code.trim())?;
    out.dedent();
    writeln!(out, "}}")?;
  }

  if let Some(code) = &options.scan_code {
    writeln!(out)?;
    writeln!(out, "fn scan(&mut self) -> ::std::result::Result<{rt}::Token, {rt}::Error> {{", rt = rt)?;
    out.indent();
    writeln!(out, "{}", code.trim())?;
    out.dedent();
    writeln!(out, "}}")?;
  }

  Ok(out.into_inner())
}

/// Five entries per line.
fn gen_production_table(table: &[[i32; 2]]) -> Result<String, fmt::Error> {
  if table.is_empty() {
    return Ok("[]".to_owned());
  }

  let mut out = IndentWriter::new("[\n".to_owned());
  out.indent();
  for line in table.chunks(5) {
    let line = line.iter()
      .map(|[lhs, len]| format!("[{}, {}],", lhs, len))
      .join(" ");
    writeln!(out, "{}", line)?;
  }
  out.dedent();
  write!(out, "]")?;
  Ok(out.into_inner())
}

fn gen_row_table(table: &[Vec<i32>]) -> Result<String, fmt::Error> {
  if table.is_empty() {
    return Ok("[]".to_owned());
  }

  let mut out = IndentWriter::new("[\n".to_owned());
  out.indent();
  for row in table {
    writeln!(out, "{},", gen_row(row))?;
  }
  out.dedent();
  write!(out, "]")?;
  Ok(out.into_inner())
}

const MAX_ROW_WIDTH: usize = 76;

/// A slice literal; rows too long for one line get aligned columns.
fn gen_row(row: &[i32]) -> String {
  let cells = row.iter().map(|x| x.to_string()).collect::<Vec<_>>();

  let line = cells.join(", ");
  if line.len() + 3 <= MAX_ROW_WIDTH {
    return format!("&[{}]", line);
  }

  let max_len = cells.iter().map(|x| x.len()).max().unwrap_or(1);
  let num_col = (MAX_ROW_WIDTH / (max_len + 2)).max(1);

  let mut value = "&[".to_owned();
  for chunk in cells.chunks(num_col) {
    value.push_str("\n  ");
    let chunk = chunk.iter()
      .map(|x| format!("{:>1$},", x, max_len))
      .join(" ");
    value.push_str(&chunk);
  }
  value.push_str("\n]");
  value
}
