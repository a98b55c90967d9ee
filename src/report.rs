use std::fmt::{self, Write};
use std::time::Duration;
use crate::Summary;

/// The summary printed at the end of a generation run.
pub fn summary(summary: &Summary) -> String {
  let mut buf = String::new();
  // writing to a `String` does not fail
  let _ = write_summary(&mut buf, summary);
  buf
}

/// Time spent in each phase, relative to the whole run.
pub fn timings(summary: &Summary) -> String {
  let mut buf = String::new();
  let _ = write_timings(&mut buf, summary);
  buf
}

fn write_summary(buf: &mut impl Write, s: &Summary) -> fmt::Result {
  writeln!(buf, "------- {} Parser Generation Summary -------", s.title)?;
  writeln!(buf, "  {} and {}", plural(s.errors, "error"), plural(s.warnings, "warning"))?;
  writeln!(buf, "  {}, {} and {} declared,",
    plural(s.terminals, "terminal"),
    plural(s.non_terminals, "non terminal"),
    plural(s.productions, "production"))?;
  writeln!(buf, "  producing {}.", plural(s.states, "unique parse state"))?;
  writeln!(buf, "  {} declared but not used.", plural(s.unused_terminals, "terminal"))?;
  writeln!(buf, "  {} declared but not used.", plural(s.unused_non_terminals, "non terminal"))?;
  writeln!(buf, "  {} never reduced.", plural(s.never_reduced, "production"))?;
  writeln!(buf, "  Code written to \"{}\" and \"{}\".", s.parser_name, s.symbols_name)?;
  writeln!(buf, "----------------------------------------------------")
}

fn write_timings(buf: &mut impl Write, s: &Summary) -> fmt::Result {
  let total = s.timings.total;
  writeln!(buf, ". . . . . . . . . . . . . . . . . . . . . . . . .")?;
  writeln!(buf, "  Timing Summary")?;
  write_phase(buf, "Total time", s.timings.total, total)?;
  write_phase(buf, "  Analysis", s.timings.analysis, total)?;
  write_phase(buf, "  Checking", s.timings.checks, total)?;
  write_phase(buf, "  Symbols", s.timings.symbols, total)?;
  write_phase(buf, "  Parser", s.timings.parser, total)?;
  writeln!(buf, "  ({} nullability and {} first set passes)",
    s.nullability_passes, s.first_set_passes)?;
  writeln!(buf, ". . . . . . . . . . . . . . . . . . . . . . . . .")
}

fn write_phase(buf: &mut impl Write, name: &str, time: Duration, total: Duration) -> fmt::Result {
  let percent = if total.as_nanos() == 0 {
    0.0
  } else {
    time.as_secs_f64() * 100.0 / total.as_secs_f64()
  };
  writeln!(buf, "    {:<16}{:>10.3} ms ({:>5.1}%)",
    name, time.as_secs_f64() * 1000.0, percent)
}

fn plural(n: usize, noun: &str) -> String {
  if n == 1 {
    format!("{} {}", n, noun)
  } else {
    format!("{} {}s", n, noun)
  }
}
