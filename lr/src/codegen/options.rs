/// Knobs of the generated source.
#[derive(Debug, Clone)]
pub struct EmitOptions {
  /// Wraps the parser in `pub mod name { ... }`.
  pub module_name: Option<String>,
  pub symbols_name: String,
  pub parser_name: String,
  /// Path of the crate providing `LrParser`, `ParseControl`, `StackValue`,
  /// `Error` and `cast`.
  pub runtime_crate: String,
  /// Paths brought in with `use`.
  pub imports: Vec<String>,
  /// Items placed in the impl block of the action struct.
  pub action_code: Option<String>,
  /// Items placed in the impl block of the parser.
  pub parser_code: Option<String>,
  /// Body of `LrParser::user_init`.
  pub init_code: Option<String>,
  /// Body of `LrParser::scan`.
  pub scan_code: Option<String>,
  /// Function called with the production text before each action.
  pub debug_grammar: Option<String>,
  pub compact_reduces: bool,
  pub emit_non_terms: bool,
  pub title: String,
}

impl Default for EmitOptions {
  fn default() -> Self {
    Self {
      module_name: None,
      symbols_name: "sym".to_owned(),
      parser_name: "Parser".to_owned(),
      runtime_crate: "cup_runtime".to_owned(),
      imports: vec![],
      action_code: None,
      parser_code: None,
      init_code: None,
      scan_code: None,
      debug_grammar: None,
      compact_reduces: false,
      emit_non_terms: false,
      title: concat!("cupgen v", env!("CARGO_PKG_VERSION")).to_owned(),
    }
  }
}

impl EmitOptions {
  pub fn module_name(mut self, name: impl Into<String>) -> Self {
    self.module_name = Some(name.into());
    self
  }

  pub fn symbols_name(mut self, name: impl Into<String>) -> Self {
    self.symbols_name = name.into();
    self
  }

  pub fn parser_name(mut self, name: impl Into<String>) -> Self {
    self.parser_name = name.into();
    self
  }

  pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
    self.runtime_crate = path.into();
    self
  }

  pub fn import(mut self, path: impl Into<String>) -> Self {
    self.imports.push(path.into());
    self
  }

  pub fn action_code(mut self, code: impl Into<String>) -> Self {
    self.action_code = Some(code.into());
    self
  }

  pub fn parser_code(mut self, code: impl Into<String>) -> Self {
    self.parser_code = Some(code.into());
    self
  }

  pub fn init_code(mut self, code: impl Into<String>) -> Self {
    self.init_code = Some(code.into());
    self
  }

  pub fn scan_code(mut self, code: impl Into<String>) -> Self {
    self.scan_code = Some(code.into());
    self
  }

  pub fn debug_grammar(mut self, function: impl Into<String>) -> Self {
    self.debug_grammar = Some(function.into());
    self
  }

  pub fn compact_reduces(mut self, compact: bool) -> Self {
    self.compact_reduces = compact;
    self
  }

  pub fn emit_non_terms(mut self, emit: bool) -> Self {
    self.emit_non_terms = emit;
    self
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }
}
