use std::io;
use pretty_assertions::assert_eq;
use cupgen::{Automaton, Error, Generator};
use cupgen::grammar::{Diagnostic, Grammar, ProductionPart as P, TerminalId};
use cupgen::lr::{EmitOptions, ParseAction, ParseActionTable, ParseReduceTable};

fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

// expr ::= NUM | expr PLUS NUM
// $START ::= expr EOF
fn calc() -> (Grammar, Automaton) {
  let mut grammar = Grammar::new();
  let num = grammar.create_terminal("NUM", "Num");
  let plus = grammar.create_terminal("PLUS", "Symbol");
  grammar.create_terminal("MINUS", "Symbol");
  let start = grammar.create_non_terminal("$START", "Symbol");
  let expr = grammar.create_non_terminal("expr", "Expr");

  let single = grammar.add_production(expr, vec![P::labeled(num, "n")], Some("RESULT.set(n);"));
  let sum = grammar.add_production(expr, vec![
    P::labeled(expr, "e"),
    P::symbol(plus),
    P::labeled(num, "n"),
  ], Some("RESULT.add(e, n);"));
  let accept = grammar.add_production(start, vec![P::symbol(expr), P::symbol(TerminalId::EOF)], None);

  let mut action_table = ParseActionTable::new(7, grammar.terminals().len());
  let mut reduce_table = ParseReduceTable::new(7, grammar.non_terminals().len());

  action_table.set(0, num, ParseAction::Shift(2));
  reduce_table.set(0, expr, 1);
  action_table.set(1, TerminalId::EOF, ParseAction::Shift(3));
  action_table.set(1, plus, ParseAction::Shift(4));
  action_table.set(2, TerminalId::EOF, ParseAction::Reduce(single));
  action_table.set(2, plus, ParseAction::Reduce(single));
  action_table.set(3, TerminalId::EOF, ParseAction::Reduce(accept));
  action_table.set(4, num, ParseAction::Shift(5));
  action_table.set(5, TerminalId::EOF, ParseAction::Reduce(sum));
  action_table.set(5, plus, ParseAction::Reduce(sum));

  let automaton = Automaton {
    action_table,
    reduce_table,
    start_state: 0,
    start_production: accept,
  };

  (grammar, automaton)
}

#[test]
fn generate_calculator() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  let generator = Generator::new(EmitOptions::default().compact_reduces(true));
  let mut parser = vec![];
  let mut symbols = vec![];

  let summary = generator.generate(&mut grammar, &mut automaton, &mut parser, &mut symbols)
    .unwrap();

  assert_eq!(summary.terminals, 5);
  assert_eq!(summary.non_terminals, 2);
  assert_eq!(summary.productions, 3);
  assert_eq!(summary.states, 7);
  assert_eq!(summary.unused_terminals, 1);
  assert_eq!(summary.unused_non_terminals, 0);
  assert_eq!(summary.never_reduced, 0);
  assert_eq!(summary.errors, 0);
  assert_eq!(summary.warnings, 1);
  assert_eq!(
    grammar.diagnostics().iter().cloned().collect::<Vec<_>>(),
    vec![Diagnostic::UnusedTerminal("MINUS".to_owned())]);

  let parser = String::from_utf8(parser).unwrap();
  assert!(parser.contains("pub static ACTION_TABLE: [&[i32]; 7] = [\n  &[2, 3, -1, 0],\n"));
  assert!(parser.contains("\n  &[-1, -1],\n  &[-1, -3],\n"));
  assert!(parser.contains(
    "(*(/*RESULT*/&mut cup_result as &mut Expr)).add(\
     (/*e*/cup_cast::<Expr>(&cup_stack[cup_top - 2])), \
     (/*n*/cup_cast::<Num>(&cup_stack[cup_top - 0])));"));

  let symbols = String::from_utf8(symbols).unwrap();
  assert!(symbols.contains("pub const MINUS: i32 = 4;"));
  assert!(!symbols.contains("expr"));
}

#[test]
fn generate_twice() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  automaton.action_table.set(5, TerminalId::EOF, ParseAction::Error);
  let plus = grammar.terminal_by_name("PLUS").unwrap();
  automaton.action_table.set(5, plus, ParseAction::Error);
  let generator = Generator::default();

  let first = generator.generate(&mut grammar, &mut automaton, &mut io::sink(), &mut io::sink())
    .unwrap();
  let second = generator.generate(&mut grammar, &mut automaton, &mut io::sink(), &mut io::sink())
    .unwrap();

  assert_eq!(first.never_reduced, 1);
  assert_eq!(second.never_reduced, 1);
  assert_eq!(first.warnings, 2);
  assert_eq!(second.warnings, 2);
  assert!(grammar.productions().iter()
    .filter(|p| grammar.display_production(p.id()) == "expr ::= NUM")
    .all(|p| p.num_reductions() == 2));
}

#[test]
fn nowarn_suppresses_warnings() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  let generator = Generator::new(EmitOptions::default()).nowarn(true);

  let summary = generator.generate(&mut grammar, &mut automaton, &mut io::sink(), &mut io::sink())
    .unwrap();

  assert_eq!(summary.unused_terminals, 1);
  assert_eq!(summary.warnings, 0);
  assert_eq!(grammar.diagnostics().iter().count(), 0);
}

#[test]
fn never_reduced_production() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  automaton.action_table.set(5, TerminalId::EOF, ParseAction::Error);
  let plus = grammar.terminal_by_name("PLUS").unwrap();
  automaton.action_table.set(5, plus, ParseAction::Error);

  let summary = Generator::default()
    .generate(&mut grammar, &mut automaton, &mut io::sink(), &mut io::sink())
    .unwrap();

  assert_eq!(summary.never_reduced, 1);
  assert!(grammar.diagnostics().iter().any(|d|
    *d == Diagnostic::ProductionNeverReduced("expr ::= expr PLUS NUM".to_owned())));
}

#[test]
fn specification_errors_stop_generation() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  let num = grammar.terminal_by_name("NUM").unwrap();
  let expr = grammar.non_terminal_by_name("expr").unwrap();
  grammar.add_production(expr, vec![P::action("use(late);"), P::labeled(num, "late")], None);

  let mut parser = Vec::<u8>::new();
  let result = Generator::default()
    .generate(&mut grammar, &mut automaton, &mut parser, &mut io::sink());

  match result {
    Err(Error::Specification(1)) => {}
    other => panic!("unexpected result: {:?}", other.map(|s| s.errors)),
  }
  assert!(parser.is_empty());
}

#[test]
fn summary_report() {
  init_logger();
  let (mut grammar, mut automaton) = calc();
  let summary = Generator::new(EmitOptions::default().title("cupgen"))
    .generate(&mut grammar, &mut automaton, &mut io::sink(), &mut io::sink())
    .unwrap();

  insta::assert_snapshot!(cupgen::report::summary(&summary), @r###"
  ------- cupgen Parser Generation Summary -------
    0 errors and 1 warning
    5 terminals, 2 non terminals and 3 productions declared,
    producing 7 unique parse states.
    1 terminal declared but not used.
    0 non terminals declared but not used.
    0 productions never reduced.
    Code written to "Parser" and "sym".
  ----------------------------------------------------
  "###);
}
