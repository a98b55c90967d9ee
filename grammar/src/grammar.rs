use log::debug;
use crate::symbol::{TerminalIdGen, NonTerminalIdGen};
use crate::production::ProductionIdGen;
use crate::{
  Terminal, TerminalId, NonTerminal, NonTerminalId, SymbolRef,
  Production, ProductionId, ProductionPart, SymbolPart,
  Translator, Diagnostics, Map,
};

/// Stack type of `EOF`, `error` and synthetic non-terminals unless
/// configured otherwise.
pub const DEFAULT_STACK_TYPE: &str = "Symbol";

/// Prefix of the names generated code introduces next to user code.
pub const DEFAULT_PREFIX: &str = "cup_";

/// All symbols and productions of one generation run.
#[derive(Debug)]
pub struct Grammar {
  terminals: Vec<Terminal>,
  non_terminals: Vec<NonTerminal>,
  productions: Vec<Production>,
  terminal_names: Map<String, TerminalId>,
  non_terminal_names: Map<String, NonTerminalId>,
  terminal_ids: TerminalIdGen,
  non_terminal_ids: NonTerminalIdGen,
  production_ids: ProductionIdGen,
  next_synthetic: u32,
  default_stack_type: String,
  prefix: String,
  pub(crate) diagnostics: Diagnostics,
}

impl Default for Grammar {
  fn default() -> Self {
    Self::new()
  }
}

impl Grammar {
  pub fn new() -> Self {
    Self::with_default_stack_type(DEFAULT_STACK_TYPE)
  }

  /// Creates an empty grammar holding only `EOF` and `error`.
  pub fn with_default_stack_type(stack_type: &str) -> Self {
    let mut grammar = Grammar {
      terminals: vec![],
      non_terminals: vec![],
      productions: vec![],
      terminal_names: Map::default(),
      non_terminal_names: Map::default(),
      terminal_ids: TerminalIdGen::default(),
      non_terminal_ids: NonTerminalIdGen::default(),
      production_ids: ProductionIdGen::default(),
      next_synthetic: 0,
      default_stack_type: stack_type.to_owned(),
      prefix: DEFAULT_PREFIX.to_owned(),
      diagnostics: Diagnostics::new(),
    };

    let eof = grammar.create_terminal("EOF", stack_type);
    let error = grammar.create_terminal("error", stack_type);
    assert_eq!(eof, TerminalId::EOF);
    assert_eq!(error, TerminalId::ERROR);

    grammar
  }

  pub fn default_stack_type(&self) -> &str {
    &self.default_stack_type
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// Sets the prefix used when translating labels. Productions added before
  /// the call keep the prefix they were translated with.
  pub fn set_prefix(&mut self, prefix: &str) {
    self.prefix = prefix.to_owned();
  }

  pub fn create_terminal(&mut self, name: &str, stack_type: &str) -> TerminalId {
    if self.terminal_names.contains_key(name) {
      internal_error!("duplicate terminal ({}) created", name);
    }

    let id = self.terminal_ids.gen();
    assert_eq!(id.index(), self.terminals.len());

    self.terminals.push(Terminal {
      name: name.to_owned(),
      id,
      stack_type: stack_type.to_owned(),
      use_count: 0,
    });
    self.terminal_names.insert(name.to_owned(), id);

    id
  }

  pub fn create_non_terminal(&mut self, name: &str, stack_type: &str) -> NonTerminalId {
    self.push_non_terminal(name.to_owned(), stack_type.to_owned(), false)
  }

  /// Creates a non-terminal with a fresh `NT$n` name.
  pub fn create_new_non_terminal(&mut self) -> NonTerminalId {
    let name = loop {
      let name = format!("NT${}", self.next_synthetic);
      self.next_synthetic += 1;
      if !self.non_terminal_names.contains_key(&name) {
        break name;
      }
    };

    let stack_type = self.default_stack_type.clone();
    self.push_non_terminal(name, stack_type, true)
  }

  fn push_non_terminal(
    &mut self,
    name: String,
    stack_type: String,
    synthetic: bool,
  ) -> NonTerminalId {
    if self.non_terminal_names.contains_key(&name) {
      internal_error!("duplicate non terminal ({}) created", name);
    }

    let id = self.non_terminal_ids.gen();
    assert_eq!(id.index(), self.non_terminals.len());

    self.non_terminal_names.insert(name.clone(), id);
    self.non_terminals.push(NonTerminal::new(name, id, stack_type, synthetic));

    id
  }

  /// Adds a production and factors its embedded actions out.
  ///
  /// An action at the end of `parts` runs before `action`. Every other
  /// action in `parts` becomes the sole action of a new production
  /// `NT$n ::= ;`, and `NT$n` takes its place in the right hand side.
  pub fn add_production(
    &mut self,
    lhs: NonTerminalId,
    mut parts: Vec<ProductionPart>,
    action: Option<&str>,
  ) -> ProductionId {
    if lhs.index() >= self.non_terminals.len() {
      internal_error!("attempt to construct a production with an unknown LHS ({})", lhs.id());
    }

    let (positions, final_pos) = slot_positions(&parts);

    let mut translator = {
      let lhs = &self.non_terminals[lhs.index()];
      Translator::new(&self.prefix, &lhs.name, &lhs.stack_type)
    };

    for (part, &pos) in parts.iter().zip(&positions) {
      if let ProductionPart::Symbol(SymbolPart { symbol, label: Some(label) }) = part {
        translator.bind(label, pos, self.stack_type(*symbol));
      }
    }

    // Actions before `final_pos` become productions of synthetic
    // non-terminals, which carry the default stack type.
    for (part, &pos) in parts.iter_mut().zip(&positions) {
      if let ProductionPart::Action(code) = part {
        *code = if pos == final_pos {
          translator.translate(code, pos)
        } else {
          translator.translate_embedded(code, pos, &self.default_stack_type)
        };
      }
    }
    let mut action = translator.translate(action.unwrap_or(""), final_pos);

    for err in translator.take_errors() {
      self.diagnostics.report(err);
    }

    let mut parts = merge_adjacent_actions(parts);

    if let Some(ProductionPart::Action(_)) = parts.last() {
      if let Some(ProductionPart::Action(tail)) = parts.pop() {
        action = tail + &action;
      }
    }

    self.non_terminals[lhs.index()].note_use();
    for part in &parts {
      if let ProductionPart::Symbol(part) = part {
        self.note_use(part.symbol);
      }
    }

    let id = self.production_ids.gen();

    let mut embedded = vec![];
    let rhs = parts.into_iter().map(|part| {
      match part {
        ProductionPart::Symbol(part) => part,
        ProductionPart::Action(code) => {
          let nt = self.create_new_non_terminal();
          embedded.push((nt, code));
          SymbolPart::new(nt)
        }
      }
    }).collect::<Vec<_>>();

    self.push_production(Production::new(id, lhs, rhs, action, None));

    for (nt, code) in embedded {
      self.non_terminals[nt.index()].note_use();
      let action_id = self.production_ids.gen();
      self.push_production(Production::new(action_id, nt, vec![], code, Some(id)));
    }

    id
  }

  fn push_production(&mut self, prod: Production) {
    assert_eq!(prod.index(), self.productions.len());

    self.non_terminals[prod.lhs.index()].productions.push(prod.id);
    self.productions.push(prod);

    let id = self.productions.len() - 1;
    debug!("production [{}]: {}", id, self.display_production(self.productions[id].id));
  }

  fn note_use(&mut self, symbol: SymbolRef) {
    match symbol {
      SymbolRef::Terminal(t) => self.terminal_mut(t).note_use(),
      SymbolRef::NonTerminal(nt) => self.non_terminal_mut(nt).note_use(),
    }
  }

  pub fn terminals(&self) -> &[Terminal] {
    &self.terminals
  }

  pub fn non_terminals(&self) -> &[NonTerminal] {
    &self.non_terminals
  }

  /// All productions, ordered by index.
  pub fn productions(&self) -> &[Production] {
    &self.productions
  }

  pub(crate) fn non_terminals_mut(&mut self) -> &mut [NonTerminal] {
    &mut self.non_terminals
  }

  pub(crate) fn split_for_analysis(&mut self) -> (&[NonTerminal], &mut [Production]) {
    (&self.non_terminals, &mut self.productions)
  }

  pub fn terminal(&self, id: TerminalId) -> &Terminal {
    self.terminals.get(id.index())
      .unwrap_or_else(|| internal_error!("terminal index {} out of range", id.id()))
  }

  fn terminal_mut(&mut self, id: TerminalId) -> &mut Terminal {
    self.terminals.get_mut(id.index())
      .unwrap_or_else(|| internal_error!("terminal index {} out of range", id.id()))
  }

  pub fn non_terminal(&self, id: NonTerminalId) -> &NonTerminal {
    self.non_terminals.get(id.index())
      .unwrap_or_else(|| internal_error!("non terminal index {} out of range", id.id()))
  }

  fn non_terminal_mut(&mut self, id: NonTerminalId) -> &mut NonTerminal {
    self.non_terminals.get_mut(id.index())
      .unwrap_or_else(|| internal_error!("non terminal index {} out of range", id.id()))
  }

  pub fn production(&self, id: ProductionId) -> &Production {
    self.productions.get(id.index())
      .unwrap_or_else(|| internal_error!("production index {} out of range", id.id()))
  }

  pub fn production_mut(&mut self, id: ProductionId) -> &mut Production {
    self.productions.get_mut(id.index())
      .unwrap_or_else(|| internal_error!("production index {} out of range", id.id()))
  }

  /// Resets the reduction count of every production.
  pub fn clear_reductions(&mut self) {
    for prod in &mut self.productions {
      prod.clear_reductions();
    }
  }

  pub fn terminal_by_name(&self, name: &str) -> Option<TerminalId> {
    self.terminal_names.get(name).copied()
  }

  pub fn non_terminal_by_name(&self, name: &str) -> Option<NonTerminalId> {
    self.non_terminal_names.get(name).copied()
  }

  pub fn symbol_name(&self, symbol: SymbolRef) -> &str {
    match symbol {
      SymbolRef::Terminal(t) => self.terminal(t).name(),
      SymbolRef::NonTerminal(nt) => self.non_terminal(nt).name(),
    }
  }

  pub fn stack_type(&self, symbol: SymbolRef) -> &str {
    match symbol {
      SymbolRef::Terminal(t) => self.terminal(t).stack_type(),
      SymbolRef::NonTerminal(nt) => self.non_terminal(nt).stack_type(),
    }
  }

  /// `lhs ::= rhs...` without actions.
  pub fn display_production(&self, id: ProductionId) -> String {
    let prod = self.production(id);
    let mut buf = format!("{} ::=", self.non_terminal(prod.lhs).name());
    for part in &prod.rhs {
      buf.push(' ');
      buf.push_str(self.symbol_name(part.symbol));
    }
    buf
  }

  pub fn diagnostics(&self) -> &Diagnostics {
    &self.diagnostics
  }

  pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
    &mut self.diagnostics
  }
}

/// Slot of every part in the factored production, and the slot of the final
/// action.
///
/// A run of adjacent actions is merged into one part, so the run shares a
/// slot. A run at the end is folded into the final action and takes no slot
/// of its own.
fn slot_positions(parts: &[ProductionPart]) -> (Vec<usize>, usize) {
  let mut positions = Vec::with_capacity(parts.len());
  let mut next = 0;

  for (i, part) in parts.iter().enumerate() {
    if part.is_action() && i > 0 && parts[i - 1].is_action() {
      positions.push(next - 1);
    } else {
      positions.push(next);
      next += 1;
    }
  }

  let final_pos = match parts.last() {
    Some(ProductionPart::Action(_)) => next - 1,
    _ => next,
  };

  (positions, final_pos)
}

fn merge_adjacent_actions(parts: Vec<ProductionPart>) -> Vec<ProductionPart> {
  let mut merged = Vec::<ProductionPart>::with_capacity(parts.len());

  for part in parts {
    match (merged.last_mut(), part) {
      (Some(ProductionPart::Action(prev)), ProductionPart::Action(code)) => {
        prev.push_str(&code);
      }
      (_, part) => merged.push(part),
    }
  }

  merged
}
