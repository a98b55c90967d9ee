use crate::{SymbolRef, NonTerminalId, TerminalSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionId(u32);

impl ProductionId {
  pub fn id(self) -> u32 {
    self.0
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Default, Debug)]
pub(crate) struct ProductionIdGen(u32);

impl ProductionIdGen {
  pub fn gen(&mut self) -> ProductionId {
    let i = self.0;
    self.0 += 1;
    ProductionId(i)
  }
}

/// A symbol occurrence on the right hand side, with an optional label that
/// actions use to refer to its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPart {
  pub symbol: SymbolRef,
  pub label: Option<String>,
}

impl SymbolPart {
  pub fn new(symbol: impl Into<SymbolRef>) -> Self {
    Self {
      symbol: symbol.into(),
      label: None,
    }
  }

  pub fn labeled(symbol: impl Into<SymbolRef>, label: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into(),
      label: Some(label.into()),
    }
  }
}

/// One element of a right hand side as written in the grammar, before
/// embedded actions are factored out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductionPart {
  Symbol(SymbolPart),
  Action(String),
}

impl ProductionPart {
  pub fn symbol(symbol: impl Into<SymbolRef>) -> Self {
    ProductionPart::Symbol(SymbolPart::new(symbol))
  }

  pub fn labeled(symbol: impl Into<SymbolRef>, label: impl Into<String>) -> Self {
    ProductionPart::Symbol(SymbolPart::labeled(symbol, label))
  }

  pub fn action(code: impl Into<String>) -> Self {
    ProductionPart::Action(code.into())
  }

  pub fn is_action(&self) -> bool {
    matches!(self, ProductionPart::Action(_))
  }
}

/// A grammar rule whose right hand side holds symbols only. The action runs
/// when the parser reduces by this production.
#[derive(Debug, Clone)]
pub struct Production {
  pub(crate) id: ProductionId,
  pub(crate) lhs: NonTerminalId,
  pub(crate) rhs: Vec<SymbolPart>,
  pub(crate) action: String,
  pub(crate) base: Option<ProductionId>,
  pub(crate) num_reductions: usize,
  pub(crate) nullable_known: bool,
  pub(crate) nullable: bool,
  pub(crate) first_set: TerminalSet,
}

impl Production {
  pub(crate) fn new(
    id: ProductionId,
    lhs: NonTerminalId,
    rhs: Vec<SymbolPart>,
    action: String,
    base: Option<ProductionId>,
  ) -> Self {
    Self {
      id,
      lhs,
      rhs,
      action,
      base,
      num_reductions: 0,
      nullable_known: false,
      nullable: false,
      first_set: TerminalSet::new(),
    }
  }

  pub fn id(&self) -> ProductionId {
    self.id
  }

  pub fn index(&self) -> usize {
    self.id.index()
  }

  pub fn lhs(&self) -> NonTerminalId {
    self.lhs
  }

  pub fn rhs(&self) -> &[SymbolPart] {
    &self.rhs
  }

  pub fn rhs_len(&self) -> usize {
    self.rhs.len()
  }

  /// Label-translated action code, empty when there is none.
  pub fn action(&self) -> &str {
    &self.action
  }

  /// The production an embedded action was factored out of.
  pub fn base(&self) -> Option<ProductionId> {
    self.base
  }

  pub fn num_reductions(&self) -> usize {
    self.num_reductions
  }

  pub fn note_reduction_use(&mut self) {
    self.num_reductions += 1;
  }

  pub(crate) fn clear_reductions(&mut self) {
    self.num_reductions = 0;
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

  pub(crate) fn set_nullable(&mut self, nullable: bool) -> bool {
    self.nullable_known = true;
    self.nullable = nullable;
    nullable
  }
}
