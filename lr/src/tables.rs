//! The parse machine as handed over by automaton construction.
//!
//! `ACTION[state][terminal]` says whether to shift, reduce or fail, and
//! `GOTO[state][non-terminal]` says where to go after a reduction. Both are
//! dense here; [`crate::encode`] turns them into the sparse runtime form.

use fnv::FnvHashMap;
use log::debug;
use grammar::{internal_error, Diagnostic, Grammar, NonTerminalId, ProductionId, TerminalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAction {
  Error,
  Shift(usize),
  Reduce(ProductionId),
}

impl Default for ParseAction {
  fn default() -> Self {
    ParseAction::Error
  }
}

/// The actions of one state, indexed by terminal.
#[derive(Debug, Clone)]
pub struct ParseActionRow {
  under_term: Vec<ParseAction>,
  default_reduce: Option<ProductionId>,
}

impl ParseActionRow {
  pub fn new(num_terminals: usize) -> Self {
    Self {
      under_term: vec![ParseAction::Error; num_terminals],
      default_reduce: None,
    }
  }

  pub fn size(&self) -> usize {
    self.under_term.len()
  }

  pub fn get(&self, terminal: TerminalId) -> ParseAction {
    self.under_term.get(terminal.index()).copied()
      .unwrap_or_else(|| internal_error!("terminal index {} out of range", terminal.id()))
  }

  pub fn set(&mut self, terminal: TerminalId, action: ParseAction) {
    match self.under_term.get_mut(terminal.index()) {
      Some(slot) => *slot = action,
      None => internal_error!("terminal index {} out of range", terminal.id()),
    }
  }

  /// Actions in terminal index order.
  pub fn actions(&self) -> &[ParseAction] {
    &self.under_term
  }

  pub fn default_reduce(&self) -> Option<ProductionId> {
    self.default_reduce
  }

  /// Picks the reduction occurring most often in the row as its default.
  /// On a tie the production with the lowest index wins.
  pub fn compute_default(&mut self) -> Option<ProductionId> {
    let mut counts = FnvHashMap::<ProductionId, usize>::default();

    for action in &self.under_term {
      if let ParseAction::Reduce(prod) = *action {
        *counts.entry(prod).or_insert(0) += 1;
      }
    }

    let max_prod = counts.into_iter()
      .max_by(|(p1, c1), (p2, c2)| c1.cmp(c2).then(p2.cmp(p1)))
      .map(|(prod, _)| prod);

    self.default_reduce = max_prod;
    max_prod
  }

  pub fn clear_default(&mut self) {
    self.default_reduce = None;
  }
}

#[derive(Debug, Clone)]
pub struct ParseActionTable {
  under_state: Vec<ParseActionRow>,
  num_terminals: usize,
}

impl ParseActionTable {
  pub fn new(num_states: usize, num_terminals: usize) -> Self {
    Self {
      under_state: vec![ParseActionRow::new(num_terminals); num_states],
      num_terminals,
    }
  }

  pub fn num_states(&self) -> usize {
    self.under_state.len()
  }

  pub fn num_terminals(&self) -> usize {
    self.num_terminals
  }

  pub fn row(&self, state: usize) -> &ParseActionRow {
    self.under_state.get(state)
      .unwrap_or_else(|| internal_error!("state {} out of range", state))
  }

  pub fn row_mut(&mut self, state: usize) -> &mut ParseActionRow {
    self.under_state.get_mut(state)
      .unwrap_or_else(|| internal_error!("state {} out of range", state))
  }

  pub fn rows(&self) -> &[ParseActionRow] {
    &self.under_state
  }

  pub fn rows_mut(&mut self) -> &mut [ParseActionRow] {
    &mut self.under_state
  }

  pub fn get(&self, state: usize, terminal: TerminalId) -> ParseAction {
    self.row(state).get(terminal)
  }

  pub fn set(&mut self, state: usize, terminal: TerminalId, action: ParseAction) {
    self.row_mut(state).set(terminal, action);
  }
}

#[derive(Debug, Clone)]
pub struct ParseReduceTable {
  under_state: Vec<Vec<Option<usize>>>,
  num_non_terminals: usize,
}

impl ParseReduceTable {
  pub fn new(num_states: usize, num_non_terminals: usize) -> Self {
    Self {
      under_state: vec![vec![None; num_non_terminals]; num_states],
      num_non_terminals,
    }
  }

  pub fn num_states(&self) -> usize {
    self.under_state.len()
  }

  pub fn num_non_terminals(&self) -> usize {
    self.num_non_terminals
  }

  /// Goto targets of one state, indexed by non-terminal.
  pub fn row(&self, state: usize) -> &[Option<usize>] {
    self.under_state.get(state)
      .unwrap_or_else(|| internal_error!("state {} out of range", state))
  }

  pub fn get(&self, state: usize, nt: NonTerminalId) -> Option<usize> {
    self.row(state).get(nt.index()).copied()
      .unwrap_or_else(|| internal_error!("non terminal index {} out of range", nt.id()))
  }

  pub fn set(&mut self, state: usize, nt: NonTerminalId, target: usize) {
    let row = self.under_state.get_mut(state)
      .unwrap_or_else(|| internal_error!("state {} out of range", state));
    match row.get_mut(nt.index()) {
      Some(slot) => *slot = Some(target),
      None => internal_error!("non terminal index {} out of range", nt.id()),
    }
  }
}

/// Counts the reductions of every production in `table`, and warns about
/// productions that are never reduced. Returns the number of those.
///
/// Counts left by an earlier call are replaced.
pub fn check_reductions(grammar: &mut Grammar, table: &ParseActionTable) -> usize {
  let num_prods = grammar.productions().len();
  grammar.clear_reductions();

  for row in table.rows() {
    for action in row.actions() {
      if let ParseAction::Reduce(prod) = *action {
        if prod.index() >= num_prods {
          internal_error!("reduce by unknown production {}", prod.id());
        }
        grammar.production_mut(prod).note_reduction_use();
      }
    }
  }

  let never_reduced = grammar.productions().iter()
    .filter(|prod| prod.num_reductions() == 0)
    .map(|prod| prod.id())
    .collect::<Vec<_>>();

  debug!("{} productions never reduced", never_reduced.len());

  for &prod in &never_reduced {
    let display = grammar.display_production(prod);
    grammar.diagnostics_mut().report(Diagnostic::ProductionNeverReduced(display));
  }

  never_reduced.len()
}
