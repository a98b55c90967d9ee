//! Encoding of the parse machine into the integer tables read at parse time.
//!
//! - production table: `[lhs index, rhs length]` per production.
//! - action table: per state, `(terminal, action)` pairs followed by
//!   `(-1, default)`. A shift to `s` is `s + 1`, a reduce by `p` is
//!   `-(p + 1)`, and a missing default is `0`.
//! - reduce table: per state, `(non-terminal, state)` pairs followed by
//!   `(-1, -1)`.

use log::trace;
use grammar::{internal_error, Grammar, ProductionId};
use crate::{ParseAction, ParseActionTable, ParseReduceTable};

pub fn encode_shift(state: usize) -> i32 {
  state as i32 + 1
}

pub fn encode_reduce(prod: ProductionId) -> i32 {
  -(prod.id() as i32 + 1)
}

pub fn production_table(grammar: &Grammar) -> Vec<[i32; 2]> {
  grammar.productions().iter()
    .map(|prod| [prod.lhs().id() as i32, prod.rhs_len() as i32])
    .collect()
}

/// Encodes every row of `table`.
///
/// With `compact_reduces` each row's most frequent reduction becomes its
/// default and its entries are left out of the row. Without it every row's
/// default is cleared.
pub fn action_table(
  grammar: &Grammar,
  table: &mut ParseActionTable,
  compact_reduces: bool,
) -> Vec<Vec<i32>> {
  let num_states = table.num_states();
  let num_prods = grammar.productions().len();

  table.rows_mut().iter_mut().enumerate().map(|(state, row)| {
    if compact_reduces {
      row.compute_default();
    } else {
      row.clear_default();
    }
    let default = row.default_reduce();

    let mut encoded = vec![];
    for (terminal, action) in row.actions().iter().enumerate() {
      match *action {
        ParseAction::Error => {}
        ParseAction::Shift(target) => {
          if target >= num_states {
            internal_error!("state {} shifts to unknown state {}", state, target);
          }
          encoded.push(terminal as i32);
          encoded.push(encode_shift(target));
        }
        ParseAction::Reduce(prod) => {
          if prod.index() >= num_prods {
            internal_error!("state {} reduces by unknown production {}", state, prod.id());
          }
          if Some(prod) != default {
            encoded.push(terminal as i32);
            encoded.push(encode_reduce(prod));
          }
        }
      }
    }

    encoded.push(-1);
    encoded.push(default.map_or(0, encode_reduce));

    trace!("action row {}: {:?}", state, encoded);
    encoded
  }).collect()
}

pub fn reduce_table(table: &ParseReduceTable) -> Vec<Vec<i32>> {
  let num_states = table.num_states();

  (0..num_states).map(|state| {
    let mut encoded = vec![];
    for (nt, target) in table.row(state).iter().enumerate() {
      if let Some(target) = *target {
        if target >= num_states {
          internal_error!("state {} goes to unknown state {}", state, target);
        }
        encoded.push(nt as i32);
        encoded.push(target as i32);
      }
    }

    encoded.push(-1);
    encoded.push(-1);
    encoded
  }).collect()
}
