//----------------------------------------------------
// The following code was generated by __(title)
//----------------------------------------------------
#[__(imports)]
pub static PRODUCTION_TABLE: [[i32; 2]; __(num_productions)] = #[__(production_table)];

pub static ACTION_TABLE: [&[i32]; __(num_states)] = #[__(action_table)];

pub static REDUCE_TABLE: [&[i32]; __(num_states)] = #[__(reduce_table)];

pub struct __(parser_name) {
  action_obj: __(pre)actions,
}

impl __(parser_name) {
  pub fn new() -> Self {
    Self {
      action_obj: __(pre)actions::new(),
    }
  }
#[__(parser_code)]}

impl __(runtime)::LrParser for __(parser_name) {
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
    __(start_state)
  }

  fn start_production(&self) -> usize {
    __(start_production)
  }

  fn eof_sym(&self) -> usize {
    __(eof)
  }

  fn error_sym(&self) -> usize {
    __(error)
  }

  fn do_action(
    &mut self,
    act_num: usize,
    parser: &mut __(runtime)::ParseControl,
    stack: &mut [__(runtime)::StackValue],
    top: usize,
  ) -> ::std::result::Result<__(runtime)::StackValue, __(runtime)::Error> {
    self.action_obj.__(pre)do_action(act_num, parser, stack, top)
  }
#[__(user_hooks)]}

#[__(actions)]