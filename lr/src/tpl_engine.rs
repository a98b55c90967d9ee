use once_cell::sync::Lazy;
use regex::{Regex, Captures};

static PARAM_REGEX: Lazy<Regex> = Lazy::new(||
  Regex::new(r#"(?x) (?:  \#\[ __ \( ([\w_]+) \) \]  |  __ \(  ([\w_]+)  \) )"#).unwrap());

/// Replaces every `__(name)` and `#[__(name)]` in `template` with what
/// `provider` returns for `name`.
///
/// The attribute form keeps a template that sits on its own line valid Rust
/// syntax; the replacement swallows the brackets.
pub fn process<F, S>(
  template: &str,
  mut provider: F
) -> String
  where
    F: FnMut(&str) -> S,
    S: ToString,
{
  PARAM_REGEX.replace_all(template, |captures: &Captures| {
    let name = captures.get(1)
      .or_else(|| captures.get(2))
      .map_or("", |m| m.as_str());
    provider(name).to_string()
  }).into_owned()
}
