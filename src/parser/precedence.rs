use std::collections::HashMap;

/// Binding strength of every known infix operator character.
///
/// Higher binds tighter. The table is seeded with the built-in operators
/// and mutated while parsing: a `binary` operator prototype installs (or
/// overwrites) its entry the moment its declaration line parses, and the
/// entry persists for the rest of the session.
#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    map: HashMap<char, i32>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        // 1 is lowest precedence.
        let mut map = HashMap::new();
        map.insert('=', 2);
        map.insert('<', 10);
        map.insert('+', 20);
        map.insert('-', 20);
        map.insert('*', 40); // highest.
        PrecedenceTable { map }
    }
}

impl PrecedenceTable {
    /// Precedence of `op`, or -1 when it is not a known infix operator.
    pub fn get(&self, op: char) -> i32 {
        self.map.get(&op).copied().unwrap_or(-1)
    }

    pub fn install(&mut self, op: char, precedence: i32) {
        self.map.insert(op, precedence);
    }
}
