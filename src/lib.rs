//! Generates table driven LR parsers.
//!
//! A [`Generator`] takes a [`Grammar`] and the parse machine built for it,
//! runs the grammar analyses and the consistency checks, and writes the
//! parser source and the symbol constant source.

use std::io;
use std::time::{Duration, Instant};
use log::info;
use thiserror::Error;
use grammar::{Grammar, ProductionId};
use lr::{EmitOptions, ParseActionTable, ParseReduceTable};

pub use grammar;
pub use lr;

pub mod report;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} error(s) in the grammar specification")]
  Specification(usize),
  #[error(transparent)]
  Emit(#[from] lr::EmitError),
}

/// The parse machine, as built by automaton construction.
#[derive(Debug, Clone)]
pub struct Automaton {
  pub action_table: ParseActionTable,
  pub reduce_table: ParseReduceTable,
  pub start_state: usize,
  pub start_production: ProductionId,
}

#[derive(Debug, Clone, Default)]
pub struct Timings {
  pub analysis: Duration,
  pub checks: Duration,
  pub symbols: Duration,
  pub parser: Duration,
  pub total: Duration,
}

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct Summary {
  pub title: String,
  pub parser_name: String,
  pub symbols_name: String,
  pub terminals: usize,
  pub non_terminals: usize,
  pub productions: usize,
  pub states: usize,
  pub nullability_passes: usize,
  pub first_set_passes: usize,
  pub unused_terminals: usize,
  pub unused_non_terminals: usize,
  pub never_reduced: usize,
  pub errors: usize,
  pub warnings: usize,
  pub timings: Timings,
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
  options: EmitOptions,
  nowarn: bool,
}

impl Generator {
  pub fn new(options: EmitOptions) -> Self {
    Self {
      options,
      nowarn: false,
    }
  }

  /// Suppresses warnings about the grammar.
  pub fn nowarn(mut self, nowarn: bool) -> Self {
    self.nowarn = nowarn;
    self
  }

  pub fn options(&self) -> &EmitOptions {
    &self.options
  }

  /// Analyzes `grammar`, checks it against `automaton`, and writes the
  /// parser to `parser_out` and the symbol constants to `symbols_out`.
  ///
  /// Nothing is written if building the grammar reported errors. A grammar
  /// can be generated more than once; the diagnostics of every run stay on
  /// the grammar, while the summary counts those of this run only.
  pub fn generate<P, S>(
    &self,
    grammar: &mut Grammar,
    automaton: &mut Automaton,
    parser_out: &mut P,
    symbols_out: &mut S,
  ) -> Result<Summary, Error>
    where
      P: io::Write,
      S: io::Write,
  {
    let start_time = Instant::now();
    let mut timings = Timings::default();

    grammar.diagnostics_mut().set_nowarn(self.nowarn);
    if grammar.diagnostics().has_errors() {
      return Err(Error::Specification(grammar.diagnostics().error_count()));
    }
    let earlier_warnings = grammar.diagnostics().warning_count();

    let phase = Instant::now();
    let nullability_passes = grammar.compute_nullability();
    let first_set_passes = grammar.compute_first_sets();
    timings.analysis = phase.elapsed();
    info!("analysis done in {} + {} passes", nullability_passes, first_set_passes);

    let phase = Instant::now();
    let (unused_terminals, unused_non_terminals) = grammar.check_unused();
    let never_reduced = lr::check_reductions(grammar, &automaton.action_table);
    timings.checks = phase.elapsed();

    let phase = Instant::now();
    lr::emit_symbols(symbols_out, grammar, &self.options)?;
    timings.symbols = phase.elapsed();

    let phase = Instant::now();
    lr::emit_parser(
      parser_out,
      grammar,
      &mut automaton.action_table,
      &automaton.reduce_table,
      automaton.start_state,
      automaton.start_production,
      &self.options,
    )?;
    timings.parser = phase.elapsed();

    timings.total = start_time.elapsed();

    Ok(Summary {
      title: self.options.title.clone(),
      parser_name: self.options.parser_name.clone(),
      symbols_name: self.options.symbols_name.clone(),
      terminals: grammar.terminals().len(),
      non_terminals: grammar.non_terminals().len(),
      productions: grammar.productions().len(),
      states: automaton.action_table.num_states(),
      nullability_passes,
      first_set_passes,
      unused_terminals,
      unused_non_terminals,
      never_reduced,
      errors: grammar.diagnostics().error_count(),
      warnings: grammar.diagnostics().warning_count() - earlier_warnings,
      timings,
    })
  }
}
