use std::fmt;
use crate::{ProductionId, TerminalSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(u32);

impl TerminalId {
  /// End of input. Always the first terminal of a grammar.
  pub const EOF: TerminalId = TerminalId(0);
  /// Error recovery terminal. Always the second terminal of a grammar.
  pub const ERROR: TerminalId = TerminalId(1);

  pub fn id(self) -> u32 {
    self.0
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(u32);

impl NonTerminalId {
  pub fn id(self) -> u32 {
    self.0
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Default, Debug)]
pub(crate) struct TerminalIdGen(u32);

impl TerminalIdGen {
  pub fn gen(&mut self) -> TerminalId {
    let i = self.0;
    self.0 += 1;
    TerminalId(i)
  }
}

#[derive(Default, Debug)]
pub(crate) struct NonTerminalIdGen(u32);

impl NonTerminalIdGen {
  pub fn gen(&mut self) -> NonTerminalId {
    let i = self.0;
    self.0 += 1;
    NonTerminalId(i)
  }
}

/// Reference to a grammar symbol of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolRef {
  Terminal(TerminalId),
  NonTerminal(NonTerminalId),
}

impl SymbolRef {
  pub fn is_terminal(self) -> bool {
    matches!(self, SymbolRef::Terminal(_))
  }

  pub fn is_non_terminal(self) -> bool {
    !self.is_terminal()
  }
}

impl From<TerminalId> for SymbolRef {
  fn from(id: TerminalId) -> Self {
    SymbolRef::Terminal(id)
  }
}

impl From<NonTerminalId> for SymbolRef {
  fn from(id: NonTerminalId) -> Self {
    SymbolRef::NonTerminal(id)
  }
}

#[derive(Debug, Clone)]
pub struct Terminal {
  pub(crate) name: String,
  pub(crate) id: TerminalId,
  pub(crate) stack_type: String,
  pub(crate) use_count: usize,
}

impl Terminal {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn id(&self) -> TerminalId {
    self.id
  }

  pub fn index(&self) -> usize {
    self.id.index()
  }

  /// Type of the semantic value carried on the parse stack.
  pub fn stack_type(&self) -> &str {
    &self.stack_type
  }

  pub fn use_count(&self) -> usize {
    self.use_count
  }

  pub(crate) fn note_use(&mut self) {
    self.use_count += 1;
  }
}

impl fmt::Display for Terminal {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
  pub(crate) name: String,
  pub(crate) id: NonTerminalId,
  pub(crate) stack_type: String,
  pub(crate) use_count: usize,
  pub(crate) synthetic: bool,
  pub(crate) productions: Vec<ProductionId>,
  pub(crate) nullable_known: bool,
  pub(crate) nullable: bool,
  pub(crate) first_set: TerminalSet,
}

impl NonTerminal {
  pub(crate) fn new(
    name: String,
    id: NonTerminalId,
    stack_type: String,
    synthetic: bool,
  ) -> Self {
    Self {
      name,
      id,
      stack_type,
      use_count: 0,
      synthetic,
      productions: vec![],
      nullable_known: false,
      nullable: false,
      first_set: TerminalSet::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn id(&self) -> NonTerminalId {
    self.id
  }

  pub fn index(&self) -> usize {
    self.id.index()
  }

  pub fn stack_type(&self) -> &str {
    &self.stack_type
  }

  pub fn use_count(&self) -> usize {
    self.use_count
  }

  /// Whether this non-terminal was created to hold an embedded action.
  pub fn is_synthetic(&self) -> bool {
    self.synthetic
  }

  /// Productions having this non-terminal as LHS, in index order.
  pub fn productions(&self) -> &[ProductionId] {
    &self.productions
  }

  pub fn nullable_known(&self) -> bool {
    self.nullable_known
  }

  pub fn nullable(&self) -> bool {
    self.nullable
  }

  pub fn first_set(&self) -> &TerminalSet {
    &self.first_set
  }

  pub(crate) fn note_use(&mut self) {
    self.use_count += 1;
  }
}

impl fmt::Display for NonTerminal {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}
