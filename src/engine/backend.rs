use std::collections::HashMap;

use crate::{
    ast::ast::{Function, Global, Prototype},
    errors::errors::Error,
};

/// Signatures of every function and operator declared or defined so far.
///
/// The registry outlives any single compiled unit: later units resolve
/// calls to (or re-declare) earlier functions through it, and it is the
/// only AST the session retains after a unit has been handed off.
#[derive(Debug, Default, Clone)]
pub struct PrototypeRegistry {
    map: HashMap<String, Prototype>,
}

impl PrototypeRegistry {
    pub fn new() -> PrototypeRegistry {
        PrototypeRegistry::default()
    }

    /// Registers a prototype, replacing any previous entry with the same
    /// name. Re-declaration is allowed; the newest signature wins.
    pub fn register(&mut self, proto: Prototype) {
        self.map.insert(proto.name.clone(), proto);
    }

    pub fn lookup(&self, name: &str) -> Option<&Prototype> {
        self.map.get(name)
    }
}

/// What the driver loop hands completed units to.
///
/// Implementations may fail on any unit; such failures are recoverable
/// and the session continues. Only `finish` may report a fatal error
/// (e.g. the batch output file cannot be written).
pub trait Backend {
    /// Installs a function definition as a persistent artifact.
    fn add_function(&mut self, function: Function, protos: &PrototypeRegistry)
        -> Result<(), Error>;

    /// Accepts a declaration-only unit.
    fn add_extern(&mut self, proto: &Prototype) -> Result<(), Error>;

    /// Installs a global variable with its initializer.
    fn add_global(&mut self, global: Global, protos: &PrototypeRegistry) -> Result<(), Error>;

    /// Handles the anonymous wrapper around a bare top-level expression.
    /// Returns `Some(value)` when the unit was evaluated immediately and
    /// `None` when it was routed to a persistent artifact instead.
    fn run_anonymous(
        &mut self,
        function: Function,
        protos: &PrototypeRegistry,
    ) -> Result<Option<f64>, Error>;

    /// Flushes whatever persistent artifact the session accumulated.
    fn finish(&mut self) -> Result<(), Error>;
}
