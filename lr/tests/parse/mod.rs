use grammar::{Grammar, ProductionId, SymbolRef, TerminalId};
use lr::EmittedTables;

fn lookup(row: &[i32], key: usize) -> i32 {
  let mut pairs = row.chunks(2);
  loop {
    match pairs.next() {
      Some(&[-1, value]) => return value,
      Some(&[k, value]) if k as usize == key => return value,
      Some(_) => {}
      None => panic!("row without terminator: {:?}", row),
    }
  }
}

/// Runs the encoded tables on `input` and records what the parser does.
/// `EOF` is supplied once the input is exhausted.
pub fn parse(
  grammar: &Grammar,
  tables: &EmittedTables,
  start_state: usize,
  start_production: ProductionId,
  input: &[TerminalId],
) -> Vec<String> {
  let mut events = vec![];
  let mut stack = vec![start_state];
  let mut tokens = input.iter().copied();
  let mut token = tokens.next().unwrap_or(TerminalId::EOF);

  loop {
    let state = *stack.last().unwrap();
    let action = lookup(&tables.action_table[state], token.index());

    if action > 0 {
      events.push(format!("shift {}", grammar.symbol_name(SymbolRef::Terminal(token))));
      stack.push((action - 1) as usize);
      token = tokens.next().unwrap_or(TerminalId::EOF);
    } else if action < 0 {
      let prod = (-action - 1) as usize;
      if prod == start_production.index() {
        events.push("accept".to_owned());
        break;
      }

      let [lhs, rhs_len] = tables.production_table[prod];
      stack.truncate(stack.len() - rhs_len as usize);
      let state0 = *stack.last().unwrap();
      let target = lookup(&tables.reduce_table[state0], lhs as usize);
      assert!(target >= 0, "no goto from state {} on {}", state0, lhs);
      stack.push(target as usize);

      let prod = &grammar.productions()[prod];
      events.push(format!("reduce {}", grammar.non_terminal(prod.lhs()).name()));
    } else {
      events.push(format!("error {}", grammar.symbol_name(SymbolRef::Terminal(token))));
      break;
    }
  }

  events
}
