//! Label translation inside action code.
//!
//! Identifiers are found by a plain scan for `[A-Za-z_][A-Za-z0-9_]*`. The
//! scan does not know about string literals or comments of the host
//! language, so a label name inside either is translated as well.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use crate::{Diagnostic, HashMap};

/// Label that refers to the value of the LHS being built.
pub const RESULT_LABEL: &str = "RESULT";

static IDENT_REGEX: Lazy<Regex> = Lazy::new(||
  Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

#[derive(Debug, Clone)]
struct Binding {
  /// `None` for the LHS.
  pos: Option<usize>,
  ty: String,
}

/// Rewrites the labels of one production into parse stack accesses.
///
/// Positions are slots of the production after embedded actions have been
/// factored out: every symbol and every run of adjacent actions occupies one
/// slot.
#[derive(Debug, Clone)]
pub struct Translator {
  prefix: String,
  lhs: String,
  labels: HashMap<String, Binding>,
  errors: Vec<Diagnostic>,
}

impl Translator {
  pub fn new(prefix: &str, lhs_name: &str, lhs_type: &str) -> Self {
    let mut labels = HashMap::default();
    labels.insert(RESULT_LABEL.to_owned(), Binding {
      pos: None,
      ty: lhs_type.to_owned(),
    });

    Self {
      prefix: prefix.to_owned(),
      lhs: lhs_name.to_owned(),
      labels,
      errors: vec![],
    }
  }

  /// Binds `label` to the symbol at slot `pos`. A later binding of the same
  /// label replaces the earlier one; `RESULT` cannot be rebound.
  pub fn bind(&mut self, label: &str, pos: usize, stack_type: &str) {
    if label == RESULT_LABEL {
      return;
    }

    self.labels.insert(label.to_owned(), Binding {
      pos: Some(pos),
      ty: stack_type.to_owned(),
    });
  }

  /// Translates every label in `code`, for an action sitting at slot
  /// `act_pos`.
  pub fn translate(&mut self, code: &str, act_pos: usize) -> String {
    self.translate_with(code, act_pos, None)
  }

  /// Like [`translate`](Self::translate), for an action that is factored out
  /// into a production of its own. `RESULT` then names the value of that
  /// production, of type `result_type`.
  pub fn translate_embedded(&mut self, code: &str, act_pos: usize, result_type: &str) -> String {
    self.translate_with(code, act_pos, Some(result_type))
  }

  fn translate_with(&mut self, code: &str, act_pos: usize, result_type: Option<&str>) -> String {
    if code.is_empty() {
      return String::new();
    }

    let labels = &self.labels;
    let prefix = &self.prefix;
    let lhs = &self.lhs;
    let errors = &mut self.errors;

    IDENT_REGEX.replace_all(code, |captures: &Captures| {
      let id = &captures[0];
      let binding = match labels.get(id) {
        Some(binding) => binding,
        None => return id.to_owned(),
      };

      match binding.pos {
        None => format!(
          "(*(/*{}*/&mut {}result as &mut {}))",
          id, prefix, result_type.unwrap_or(&binding.ty)),
        Some(pos) if pos >= act_pos => {
          errors.push(Diagnostic::LabelBeforeUse {
            label: id.to_owned(),
            lhs: lhs.clone(),
          });
          id.to_owned()
        }
        Some(pos) => {
          let offset = act_pos - pos - 1;
          format!(
            "(/*{id}*/{pre}cast::<{ty}>(&{pre}stack[{pre}top - {offset}]))",
            id = id,
            pre = prefix,
            ty = binding.ty,
            offset = offset,
          )
        }
      }
    }).into_owned()
  }

  /// Diagnostics collected since the last call.
  pub fn take_errors(&mut self) -> Vec<Diagnostic> {
    std::mem::take(&mut self.errors)
  }
}
