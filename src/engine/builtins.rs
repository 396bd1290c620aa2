use std::{collections::HashMap, io::Write};

use lazy_static::lazy_static;

/// A runtime support function callable from user programs once declared
/// with `extern`. All values are doubles, including the returned one.
pub type Builtin = fn(&[f64]) -> f64;

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let mut map = HashMap::new();
        map.insert("putchard", putchard as Builtin);
        map.insert("printd", printd as Builtin);
        map
    };
}

/// putchard - writes a single character given its numeric code, returns 0.
fn putchard(args: &[f64]) -> f64 {
    let code = args.first().copied().unwrap_or(0.0);
    eprint!("{}", (code as u8) as char);
    let _ = std::io::stderr().flush();
    0.0
}

/// printd - prints a number followed by a newline, returns 0.
fn printd(args: &[f64]) -> f64 {
    let value = args.first().copied().unwrap_or(0.0);
    eprintln!("{:.6}", value);
    0.0
}
