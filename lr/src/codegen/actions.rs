use std::fmt::{self, Write};
use grammar::{Grammar, Production, ProductionId};
use crate::IndentWriter;
use super::EmitOptions;

pub(super) const ALLOW: &str = "#[allow(dead_code, non_camel_case_types, unused_parens, unused_mut, \
  unused_variables, unused_braces, non_snake_case)]";

/// Writes the action struct whose `do_action` runs the action of the
/// production it is given, plus the `cast` helper the translated labels call.
pub fn gen<W: Write>(
  grammar: &Grammar,
  start_production: ProductionId,
  options: &EmitOptions,
  out: &mut IndentWriter<W>,
) -> fmt::Result {
  let pre = grammar.prefix();
  let rt = &options.runtime_crate;

  writeln!(out, "{}", ALLOW)?;
  writeln!(out, "fn {}cast<T: 'static>(value: &{}::StackValue) -> &T {{", pre, rt)?;
  out.indent();
  writeln!(out, "{}::cast(value)", rt)?;
  out.dedent();
  writeln!(out, "}}")?;
  writeln!(out)?;

  writeln!(out, "/// Encapsulates user supplied action code.")?;
  writeln!(out, "{}", ALLOW)?;
  writeln!(out, "pub struct {}actions;", pre)?;
  writeln!(out)?;
  writeln!(out, "{}", ALLOW)?;
  writeln!(out, "impl {}actions {{", pre)?;
  out.indent();

  writeln!(out, "pub fn new() -> Self {{")?;
  out.indent();
  writeln!(out, "{}actions", pre)?;
  out.dedent();
  writeln!(out, "}}")?;

  if let Some(code) = &options.action_code {
    writeln!(out)?;
    writeln!(out, "{}", code.trim())?;
  }

  writeln!(out)?;
  writeln!(out, "pub fn {}do_action(", pre)?;
  out.indent();
  writeln!(out, "&mut self,")?;
  writeln!(out, "{}act_num: usize,", pre)?;
  writeln!(out, "{}parser: &mut {}::ParseControl,", pre, rt)?;
  writeln!(out, "{}stack: &mut [{}::StackValue],", pre, rt)?;
  writeln!(out, "{}top: usize,", pre)?;
  out.dedent();
  writeln!(out, ") -> ::std::result::Result<{rt}::StackValue, {rt}::Error> {{", rt = rt)?;
  out.indent();
  writeln!(out, "match {}act_num {{", pre)?;
  out.indent();

  for prod in grammar.productions() {
    gen_case(grammar, prod, prod.id() == start_production, options, out)?;
  }

  writeln!(out, "_ => Err({}::Error::InvalidAction({}act_num)),", rt, pre)?;
  out.dedent();
  writeln!(out, "}}")?;
  out.dedent();
  writeln!(out, "}}")?;
  out.dedent();
  writeln!(out, "}}")
}

fn gen_case<W: Write>(
  grammar: &Grammar,
  prod: &Production,
  accept: bool,
  options: &EmitOptions,
  out: &mut IndentWriter<W>,
) -> fmt::Result {
  let pre = grammar.prefix();
  let lhs = grammar.non_terminal(prod.lhs());
  let text = grammar.display_production(prod.id());

  writeln!(out, "// {}", text)?;
  writeln!(out, "{} => {{", prod.index())?;
  out.indent();

  writeln!(out, "let mut {}result = <{}>::new(/*{}*/{});",
    pre, lhs.stack_type(), lhs.name(), lhs.index())?;

  if let Some(debug) = &options.debug_grammar {
    writeln!(out, "{}({:?});", debug, text)?;
  }

  let action = prod.action().trim();
  if !action.is_empty() {
    writeln!(out, "{{")?;
    out.indent();
    writeln!(out, "{}", action)?;
    out.dedent();
    writeln!(out, "}}")?;
  }

  if accept {
    writeln!(out, "/* ACCEPT */")?;
    writeln!(out, "{}parser.done_parsing();", pre)?;
  }

  writeln!(out, "Ok(Box::new({}result))", pre)?;
  out.dedent();
  writeln!(out, "}}")
}
