use pretty_assertions::assert_eq;
use grammar::{Grammar, ProductionId, ProductionPart as P, TerminalId};
use lr::{EmitOptions, ParseAction, ParseActionTable, ParseReduceTable};

mod parse;

fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

struct Machine {
  grammar: Grammar,
  actions: ParseActionTable,
  gotos: ParseReduceTable,
  b: TerminalId,
  c: TerminalId,
  accept: ProductionId,
}

// START ::= A EOF
// A ::= b:x {log(x);} c:y {RESULT.join(y);}
fn machine() -> Machine {
  let mut grammar = Grammar::new();
  let b = grammar.create_terminal("b", "Tok");
  let c = grammar.create_terminal("c", "Tok");
  let start = grammar.create_non_terminal("START", "Symbol");
  let a = grammar.create_non_terminal("A", "Node");

  let p0 = grammar.add_production(a, vec![
    P::labeled(b, "x"),
    P::action("log(x);"),
    P::labeled(c, "y"),
  ], Some("RESULT.join(y);"));
  let accept = grammar.add_production(start, vec![
    P::symbol(a),
    P::symbol(TerminalId::EOF),
  ], None);

  let nt0 = grammar.non_terminal_by_name("NT$0").unwrap();
  let p1 = grammar.non_terminal(nt0).productions()[0];

  let mut actions = ParseActionTable::new(6, grammar.terminals().len());
  let mut gotos = ParseReduceTable::new(6, grammar.non_terminals().len());

  actions.set(0, b, ParseAction::Shift(2));
  gotos.set(0, a, 1);
  actions.set(1, TerminalId::EOF, ParseAction::Shift(3));
  actions.set(2, c, ParseAction::Reduce(p1));
  gotos.set(2, nt0, 4);
  actions.set(3, TerminalId::EOF, ParseAction::Reduce(accept));
  actions.set(4, c, ParseAction::Shift(5));
  actions.set(5, TerminalId::EOF, ParseAction::Reduce(p0));

  Machine { grammar, actions, gotos, b, c, accept }
}

fn emit(m: &mut Machine, options: &EmitOptions) -> (String, lr::EmittedTables) {
  let mut out = vec![];
  let tables = lr::emit_parser(
    &mut out, &m.grammar, &mut m.actions, &m.gotos, 0, m.accept, options).unwrap();
  (String::from_utf8(out).unwrap(), tables)
}

#[test]
fn embedded_action_reduces_between_its_neighbours() {
  init_logger();
  let mut m = machine();
  let (_, tables) = emit(&mut m, &EmitOptions::default().compact_reduces(true));

  assert_eq!(
    parse::parse(&m.grammar, &tables, 0, m.accept, &[m.b, m.c]),
    vec!["shift b", "reduce NT$0", "shift c", "reduce A", "shift EOF", "accept"]);
}

#[test]
fn uncompacted_tables_parse_the_same() {
  let mut m = machine();
  let (_, tables) = emit(&mut m, &EmitOptions::default());

  assert_eq!(tables.action_table[5], vec![0, -1, -1, 0]);
  assert_eq!(
    parse::parse(&m.grammar, &tables, 0, m.accept, &[m.b, m.c]),
    vec!["shift b", "reduce NT$0", "shift c", "reduce A", "shift EOF", "accept"]);
}

#[test]
fn unexpected_token() {
  let mut m = machine();
  let (_, tables) = emit(&mut m, &EmitOptions::default());

  assert_eq!(
    parse::parse(&m.grammar, &tables, 0, m.accept, &[m.c]),
    vec!["error c"]);
}

#[test]
fn encoded_tables() {
  let mut m = machine();
  let (_, tables) = emit(&mut m, &EmitOptions::default().compact_reduces(true));

  assert_eq!(tables.production_table, vec![[1, 3], [2, 0], [0, 2]]);
  assert_eq!(tables.action_table, vec![
    vec![2, 3, -1, 0],
    vec![0, 4, -1, 0],
    vec![-1, -2],
    vec![-1, -3],
    vec![3, 6, -1, 0],
    vec![-1, -1],
  ]);
  assert_eq!(tables.reduce_table, vec![
    vec![1, 1, -1, -1],
    vec![-1, -1],
    vec![2, 4, -1, -1],
    vec![-1, -1],
    vec![-1, -1],
    vec![-1, -1],
  ]);
}

#[test]
fn parser_source() {
  init_logger();
  let mut m = machine();
  let options = EmitOptions::default()
    .compact_reduces(true)
    .title("cupgen");
  let (source, _) = emit(&mut m, &options);

  insta::assert_snapshot!(source, @r###"
  //----------------------------------------------------
  // The following code was generated by cupgen
  //----------------------------------------------------

  pub static PRODUCTION_TABLE: [[i32; 2]; 3] = [
    [1, 3], [2, 0], [0, 2],
  ];

  pub static ACTION_TABLE: [&[i32]; 6] = [
    &[2, 3, -1, 0],
    &[0, 4, -1, 0],
    &[-1, -2],
    &[-1, -3],
    &[3, 6, -1, 0],
    &[-1, -1],
  ];

  pub static REDUCE_TABLE: [&[i32]; 6] = [
    &[1, 1, -1, -1],
    &[-1, -1],
    &[2, 4, -1, -1],
    &[-1, -1],
    &[-1, -1],
    &[-1, -1],
  ];

  pub struct Parser {
    action_obj: cup_actions,
  }

  impl Parser {
    pub fn new() -> Self {
      Self {
        action_obj: cup_actions::new(),
      }
    }
  }

  impl cup_runtime::LrParser for Parser {
    fn production_table(&self) -> &'static [[i32; 2]] {
      &PRODUCTION_TABLE
    }

    fn action_table(&self) -> &'static [&'static [i32]] {
      &ACTION_TABLE
    }

    fn reduce_table(&self) -> &'static [&'static [i32]] {
      &REDUCE_TABLE
    }

    fn start_state(&self) -> usize {
      0
    }

    fn start_production(&self) -> usize {
      2
    }

    fn eof_sym(&self) -> usize {
      0
    }

    fn error_sym(&self) -> usize {
      1
    }

    fn do_action(
      &mut self,
      act_num: usize,
      parser: &mut cup_runtime::ParseControl,
      stack: &mut [cup_runtime::StackValue],
      top: usize,
    ) -> ::std::result::Result<cup_runtime::StackValue, cup_runtime::Error> {
      self.action_obj.cup_do_action(act_num, parser, stack, top)
    }
  }

  #[allow(dead_code, non_camel_case_types, unused_parens, unused_mut, unused_variables, unused_braces, non_snake_case)]
  fn cup_cast<T: 'static>(value: &cup_runtime::StackValue) -> &T {
    cup_runtime::cast(value)
  }

  /// Encapsulates user supplied action code.
  #[allow(dead_code, non_camel_case_types, unused_parens, unused_mut, unused_variables, unused_braces, non_snake_case)]
  pub struct cup_actions;

  #[allow(dead_code, non_camel_case_types, unused_parens, unused_mut, unused_variables, unused_braces, non_snake_case)]
  impl cup_actions {
    pub fn new() -> Self {
      cup_actions
    }

    pub fn cup_do_action(
      &mut self,
      cup_act_num: usize,
      cup_parser: &mut cup_runtime::ParseControl,
      cup_stack: &mut [cup_runtime::StackValue],
      cup_top: usize,
    ) -> ::std::result::Result<cup_runtime::StackValue, cup_runtime::Error> {
      match cup_act_num {
        // A ::= b NT$0 c
        0 => {
          let mut cup_result = <Node>::new(/*A*/1);
          {
            (*(/*RESULT*/&mut cup_result as &mut Node)).join((/*y*/cup_cast::<Tok>(&cup_stack[cup_top - 0])));
          }
          Ok(Box::new(cup_result))
        }
        // NT$0 ::=
        1 => {
          let mut cup_result = <Symbol>::new(/*NT$0*/2);
          {
            log((/*x*/cup_cast::<Tok>(&cup_stack[cup_top - 0])));
          }
          Ok(Box::new(cup_result))
        }
        // START ::= A EOF
        2 => {
          let mut cup_result = <Symbol>::new(/*START*/0);
          /* ACCEPT */
          cup_parser.done_parsing();
          Ok(Box::new(cup_result))
        }
        _ => Err(cup_runtime::Error::InvalidAction(cup_act_num)),
      }
    }
  }
  "###);
}

#[test]
fn user_code_and_module() {
  let mut m = machine();
  let options = EmitOptions::default()
    .module_name("calc")
    .import("std::rc::Rc")
    .parser_code("pub fn depth(&self) -> usize { 0 }")
    .init_code("Ok(())")
    .scan_code("self.lexer.next_token()");
  let (source, _) = emit(&mut m, &options);

  assert!(source.starts_with("#[allow("));
  assert!(source.contains("\npub mod calc {\n  //---"));
  assert!(source.contains("\n\n  use std::rc::Rc;\n\n  pub static PRODUCTION_TABLE"));
  assert!(source.contains("\n    }\n\n    pub fn depth(&self) -> usize { 0 }\n  }\n"));
  assert!(source.contains(
    "\n    fn user_init(&mut self) -> ::std::result::Result<(), cup_runtime::Error> {\n      Ok(())\n    }\n"));
  assert!(source.contains(
    "\n    fn scan(&mut self) -> ::std::result::Result<cup_runtime::Token, cup_runtime::Error> {\n      self.lexer.next_token()\n    }\n  }\n"));
  assert!(source.ends_with("    }\n  }\n}\n"));
}

#[test]
fn symbol_source() {
  let m = machine();
  let mut out = vec![];
  lr::emit_symbols(&mut out, &m.grammar, &EmitOptions::default().title("cupgen")).unwrap();

  insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
  //----------------------------------------------------
  // The following code was generated by cupgen
  //----------------------------------------------------

  /// Symbol indices shared by the scanner and the parser.
  #[allow(non_upper_case_globals)]
  pub mod sym {
    /* terminals */
    pub const EOF: i32 = 0;
    pub const error: i32 = 1;
    pub const b: i32 = 2;
    pub const c: i32 = 3;
  }
  "###);
}

#[test]
#[should_panic(expected = "internal error: start state 6 out of range")]
fn start_state_out_of_range() {
  let mut m = machine();
  let mut out = Vec::<u8>::new();
  let _ = lr::emit_parser(
    &mut out, &m.grammar, &mut m.actions, &m.gotos, 6, m.accept, &EmitOptions::default());
}

#[test]
fn reductions_after_emission() {
  let mut m = machine();
  emit(&mut m, &EmitOptions::default().compact_reduces(true));

  assert_eq!(lr::check_reductions(&mut m.grammar, &m.actions), 0);
  assert!(m.grammar.productions().iter().all(|p| p.num_reductions() == 1));
}

#[test]
fn embedded_result_uses_synthetic_type() {
  let mut grammar = Grammar::new();
  let b = grammar.create_terminal("b", "Tok");
  let a = grammar.create_non_terminal("A", "Node");
  let p = grammar.add_production(a, vec![
    P::symbol(b),
    P::action("RESULT.mark();"),
    P::symbol(b),
  ], None);

  let mut actions = ParseActionTable::new(1, grammar.terminals().len());
  let gotos = ParseReduceTable::new(1, grammar.non_terminals().len());
  let mut out = vec![];
  lr::emit_parser(&mut out, &grammar, &mut actions, &gotos, 0, p, &EmitOptions::default())
    .unwrap();
  let source = String::from_utf8(out).unwrap();

  assert!(source.contains(
    "        let mut cup_result = <Symbol>::new(/*NT$0*/1);\n        {\n          \
     (*(/*RESULT*/&mut cup_result as &mut Symbol)).mark();\n"));
  assert!(!source.contains("as &mut Node"));
}
