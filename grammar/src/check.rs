use log::debug;
use crate::{Diagnostic, Grammar, TerminalId};

impl Grammar {
  /// Warns about every declared symbol no production uses.
  ///
  /// `EOF` and `error` are exempt. Returns the number of unused terminals
  /// and unused non-terminals.
  pub fn check_unused(&mut self) -> (usize, usize) {
    let unused_terminals = self.terminals().iter()
      .filter(|t| t.id() != TerminalId::EOF && t.id() != TerminalId::ERROR)
      .filter(|t| t.use_count() == 0)
      .map(|t| Diagnostic::UnusedTerminal(t.name().to_owned()))
      .collect::<Vec<_>>();

    let unused_non_terminals = self.non_terminals().iter()
      .filter(|nt| nt.use_count() == 0)
      .map(|nt| Diagnostic::UnusedNonTerminal(nt.name().to_owned()))
      .collect::<Vec<_>>();

    let counts = (unused_terminals.len(), unused_non_terminals.len());
    debug!("unused symbols: {} terminals, {} non terminals", counts.0, counts.1);

    for diagnostic in unused_terminals.into_iter().chain(unused_non_terminals) {
      self.diagnostics.report(diagnostic);
    }

    counts
  }
}
