//! compute NULLABLE and FIRST sets.
//!
//! Both are monotone fixed points: a non-terminal only ever becomes nullable
//! and first sets only ever grow, so repeating whole passes until one of
//! them changes nothing terminates.

use log::trace;
use crate::{Grammar, NonTerminal, Production, SymbolRef, TerminalSet};

impl Production {
  /// Checks whether the production (now) appears to be nullable.
  ///
  /// A `false` result is final only if the RHS holds a terminal; otherwise
  /// some non-terminal of the RHS may still turn out nullable.
  pub fn check_nullable(&mut self, nts: &[NonTerminal]) -> bool {
    if self.nullable_known {
      return self.nullable;
    }

    if self.rhs.is_empty() {
      return self.set_nullable(true);
    }

    if self.rhs.iter().any(|part| part.symbol.is_terminal()) {
      return self.set_nullable(false);
    }

    let all_nullable = self.rhs.iter().all(|part| match part.symbol {
      SymbolRef::NonTerminal(nt) => nts[nt.index()].nullable,
      SymbolRef::Terminal(_) => false,
    });

    if all_nullable {
      self.set_nullable(true)
    } else {
      false
    }
  }

  /// Updates the first set from the current first sets of non-terminals.
  pub fn check_first_set(&mut self, nts: &[NonTerminal]) -> &TerminalSet {
    for part in &self.rhs {
      match part.symbol {
        SymbolRef::Terminal(t) => {
          self.first_set.insert(t.index());
          break;
        }
        SymbolRef::NonTerminal(nt) => {
          let nt = &nts[nt.index()];
          self.first_set.union_with(&nt.first_set);
          if !nt.nullable {
            break;
          }
        }
      }
    }

    &self.first_set
  }
}

impl Grammar {
  /// One pass over every non-terminal not yet known to be nullable.
  ///
  /// Returns whether any non-terminal became nullable.
  pub fn nullability_pass(&mut self) -> bool {
    let mut changed = false;

    for i in 0..self.non_terminals().len() {
      if self.non_terminals()[i].nullable {
        continue;
      }

      let looks_nullable = {
        let (nts, prods) = self.split_for_analysis();
        nts[i].productions.iter()
          .any(|prod| prods[prod.index()].check_nullable(nts))
      };

      if looks_nullable {
        self.non_terminals_mut()[i].nullable = true;
        changed = true;
      }
    }

    changed
  }

  /// Runs nullability passes to the fixed point, then settles the
  /// nullability of every production. Returns the number of passes.
  pub fn compute_nullability(&mut self) -> usize {
    let limit = self.pass_limit();
    let mut passes = 0;

    loop {
      passes += 1;
      if passes > limit {
        internal_error!("nullability did not converge after {} passes", limit);
      }

      let changed = self.nullability_pass();
      trace!("nullability pass {}: changed = {}", passes, changed);
      if !changed {
        break;
      }
    }

    let (nts, prods) = self.split_for_analysis();
    for prod in prods.iter_mut() {
      let nullable = prod.check_nullable(nts);
      prod.set_nullable(nullable);
    }
    for nt in self.non_terminals_mut() {
      nt.nullable_known = true;
    }

    passes
  }

  /// One pass adding every production's first set to its LHS.
  ///
  /// Returns whether any first set grew.
  pub fn first_set_pass(&mut self) -> bool {
    let mut changed = false;

    for i in 0..self.non_terminals().len() {
      for j in 0..self.non_terminals()[i].productions.len() {
        let prod = self.non_terminals()[i].productions[j];
        let prod_first = {
          let (nts, prods) = self.split_for_analysis();
          prods[prod.index()].check_first_set(nts).clone()
        };

        let nt_first = &mut self.non_terminals_mut()[i].first_set;
        let before = nt_first.len();
        nt_first.union_with(&prod_first);
        changed |= nt_first.len() != before;
      }
    }

    changed
  }

  /// Runs first set passes to the fixed point. Nullability must be computed
  /// first. Returns the number of passes.
  pub fn compute_first_sets(&mut self) -> usize {
    let limit = self.pass_limit();
    let mut passes = 0;

    loop {
      passes += 1;
      if passes > limit {
        internal_error!("first sets did not converge after {} passes", limit);
      }

      let changed = self.first_set_pass();
      trace!("first set pass {}: changed = {}", passes, changed);
      if !changed {
        break;
      }
    }

    passes
  }

  /// FIRST of a sequence of symbols, given the current analysis results.
  pub fn first_of(&self, symbols: &[SymbolRef]) -> (TerminalSet, bool) {
    let mut first = TerminalSet::new();

    for &symbol in symbols {
      match symbol {
        SymbolRef::Terminal(t) => {
          first.insert(t.index());
          return (first, false);
        }
        SymbolRef::NonTerminal(nt) => {
          let nt = self.non_terminal(nt);
          first.union_with(&nt.first_set);
          if !nt.nullable {
            return (first, false);
          }
        }
      }
    }

    (first, true)
  }

  fn pass_limit(&self) -> usize {
    self.terminals().len() + self.non_terminals().len() + 1
  }
}
