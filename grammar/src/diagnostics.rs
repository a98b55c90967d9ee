use log::{error, warn};
use thiserror::Error;

/// A mistake in the grammar specification.
///
/// Reporting one never stops the run, so that every mistake of a grammar
/// shows up in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
  #[error("label \"{label}\" appears in action before it appears in production of {lhs}")]
  LabelBeforeUse {
    label: String,
    lhs: String,
  },
  #[error("terminal \"{0}\" was declared but never used")]
  UnusedTerminal(String),
  #[error("non terminal \"{0}\" was declared but never used")]
  UnusedNonTerminal(String),
  #[error("production \"{0}\" never reduced")]
  ProductionNeverReduced(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Error,
  Warning,
}

impl Diagnostic {
  pub fn severity(&self) -> Severity {
    match self {
      Diagnostic::LabelBeforeUse { .. } => Severity::Error,
      Diagnostic::UnusedTerminal(_)
      | Diagnostic::UnusedNonTerminal(_)
      | Diagnostic::ProductionNeverReduced(_) => Severity::Warning,
    }
  }
}

/// Counted channel for specification errors and warnings.
#[derive(Debug, Default)]
pub struct Diagnostics {
  reported: Vec<Diagnostic>,
  error_count: usize,
  warning_count: usize,
  nowarn: bool,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Suppresses warnings. Suppressed warnings are neither kept nor counted.
  pub fn set_nowarn(&mut self, nowarn: bool) {
    self.nowarn = nowarn;
  }

  pub fn report(&mut self, diagnostic: Diagnostic) {
    match diagnostic.severity() {
      Severity::Error => {
        error!("{}", diagnostic);
        self.error_count += 1;
      }
      Severity::Warning => {
        if self.nowarn {
          return;
        }
        warn!("{}", diagnostic);
        self.warning_count += 1;
      }
    }
    self.reported.push(diagnostic);
  }

  pub fn error_count(&self) -> usize {
    self.error_count
  }

  pub fn warning_count(&self) -> usize {
    self.warning_count
  }

  pub fn has_errors(&self) -> bool {
    self.error_count > 0
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.reported.iter()
  }
}
