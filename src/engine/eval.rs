use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{Expr, Function, Global, Prototype},
    errors::errors::{Error, ErrorKind},
};

use super::{
    backend::{Backend, PrototypeRegistry},
    builtins::BUILTINS,
};

/// Innermost-last stack of lexical scopes for one function activation.
/// Lookup walks it back to front, so inner bindings shadow outer ones.
type Scopes = Vec<HashMap<String, f64>>;

/// Tree-walking execution engine.
///
/// Implements the full semantic contract over the AST: mutable lexically
/// scoped bindings, expression-valued control flow, user-defined
/// operators dispatched through the `unaryX`/`binaryX` name scheme, and
/// globals visible from every function body. Named definitions stay
/// loaded until the session ends; the artifact of an anonymous top-level
/// expression lives only for its single invocation.
pub struct Evaluator {
    functions: HashMap<String, Rc<Function>>,
    globals: HashMap<String, f64>,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator {
            functions: HashMap::new(),
            globals: HashMap::new(),
        }
    }

    fn call(&mut self, callee: &str, args: &[f64], protos: &PrototypeRegistry) -> Result<f64, Error> {
        if let Some(function) = self.functions.get(callee).cloned() {
            if function.proto.params.len() != args.len() {
                return Err(Error::semantic(ErrorKind::WrongArgumentCount {
                    callee: callee.to_string(),
                    expected: function.proto.params.len(),
                    received: args.len(),
                }));
            }

            let frame = function
                .proto
                .params
                .iter()
                .cloned()
                .zip(args.iter().copied())
                .collect::<HashMap<_, _>>();
            let mut scopes = vec![frame];
            return self.eval(&function.body, &mut scopes, protos);
        }

        // Externs resolve against the runtime support table; a declared
        // name with no backing symbol is as unknown as an undeclared one.
        if let Some(proto) = protos.lookup(callee) {
            if proto.params.len() != args.len() {
                return Err(Error::semantic(ErrorKind::WrongArgumentCount {
                    callee: callee.to_string(),
                    expected: proto.params.len(),
                    received: args.len(),
                }));
            }
            if let Some(builtin) = BUILTINS.get(callee) {
                return Ok(builtin(args));
            }
        }

        Err(Error::semantic(ErrorKind::UnknownCallee {
            name: callee.to_string(),
        }))
    }

    fn load(&self, name: &str, scopes: &Scopes) -> Result<f64, Error> {
        for frame in scopes.iter().rev() {
            if let Some(value) = frame.get(name) {
                return Ok(*value);
            }
        }
        if let Some(value) = self.globals.get(name) {
            return Ok(*value);
        }
        Err(Error::semantic(ErrorKind::UnknownVariable {
            name: name.to_string(),
        }))
    }

    fn store(&mut self, name: &str, value: f64, scopes: &mut Scopes) -> Result<(), Error> {
        for frame in scopes.iter_mut().rev() {
            if let Some(slot) = frame.get_mut(name) {
                *slot = value;
                return Ok(());
            }
        }
        if let Some(slot) = self.globals.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        Err(Error::semantic(ErrorKind::UnknownVariable {
            name: name.to_string(),
        }))
    }

    fn eval(&mut self, expr: &Expr, scopes: &mut Scopes, protos: &PrototypeRegistry) -> Result<f64, Error> {
        match expr {
            Expr::Number(value) => Ok(*value),

            Expr::Variable(name) => self.load(name, scopes),

            Expr::Unary { op, operand } => {
                let value = self.eval(operand, scopes, protos)?;
                let callee = format!("unary{}", op);
                if self.functions.contains_key(&callee) {
                    self.call(&callee, &[value], protos)
                } else {
                    Err(Error::semantic(ErrorKind::UnknownUnaryOperator { op: *op }))
                }
            }

            // Assignment: the value is computed first, then stored through
            // whichever binding (or global) the name resolves to.
            Expr::Binary { op: '=', lhs, rhs } => {
                let name = match lhs.as_ref() {
                    Expr::Variable(name) => name.clone(),
                    _ => return Err(Error::semantic(ErrorKind::InvalidAssignmentTarget)),
                };
                let value = self.eval(rhs, scopes, protos)?;
                self.store(&name, value, scopes)?;
                Ok(value)
            }

            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs, scopes, protos)?;
                let r = self.eval(rhs, scopes, protos)?;
                match op {
                    '+' => Ok(l + r),
                    '-' => Ok(l - r),
                    '*' => Ok(l * r),
                    '<' => Ok(if l < r { 1.0 } else { 0.0 }),
                    _ => {
                        let callee = format!("binary{}", op);
                        if self.functions.contains_key(&callee) {
                            self.call(&callee, &[l, r], protos)
                        } else {
                            Err(Error::semantic(ErrorKind::UnknownBinaryOperator {
                                op: *op,
                            }))
                        }
                    }
                }
            }

            Expr::Call { callee, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg, scopes, protos))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(callee, &values, protos)
            }

            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond, scopes, protos)? != 0.0 {
                    self.eval(then_branch, scopes, protos)
                } else {
                    self.eval(else_branch, scopes, protos)
                }
            }

            Expr::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                let start_value = self.eval(start, scopes, protos)?;
                let mut frame = HashMap::new();
                frame.insert(var.clone(), start_value);
                scopes.push(frame);

                let result = self.run_for(var, end, step.as_deref(), body, scopes, protos);
                scopes.pop();
                result
            }

            Expr::Var { bindings, body } => {
                scopes.push(HashMap::new());
                let result = self.eval_bindings(bindings, body, scopes, protos);
                scopes.pop();
                result
            }
        }
    }

    /// Loop layout: the body runs, then the step and the end condition are
    /// computed (the condition sees the pre-increment value), then the
    /// induction variable advances and the condition decides whether to
    /// go around again. The whole expression always yields 0.
    fn run_for(
        &mut self,
        var: &str,
        end: &Expr,
        step: Option<&Expr>,
        body: &Expr,
        scopes: &mut Scopes,
        protos: &PrototypeRegistry,
    ) -> Result<f64, Error> {
        loop {
            self.eval(body, scopes, protos)?;

            let step_value = match step {
                Some(step) => self.eval(step, scopes, protos)?,
                None => 1.0,
            };
            let end_value = self.eval(end, scopes, protos)?;

            let current = self.load(var, scopes)?;
            self.store(var, current + step_value, scopes)?;

            if end_value == 0.0 {
                return Ok(0.0);
            }
        }
    }

    /// Each initializer sees the bindings introduced before it in the same
    /// `var` list; a missing initializer defaults to 0.
    fn eval_bindings(
        &mut self,
        bindings: &[(String, Option<Expr>)],
        body: &Expr,
        scopes: &mut Scopes,
        protos: &PrototypeRegistry,
    ) -> Result<f64, Error> {
        for (name, init) in bindings {
            let value = match init {
                Some(init) => self.eval(init, scopes, protos)?,
                None => 0.0,
            };
            if let Some(frame) = scopes.last_mut() {
                frame.insert(name.clone(), value);
            }
        }
        self.eval(body, scopes, protos)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

impl Backend for Evaluator {
    fn add_function(
        &mut self,
        function: Function,
        _protos: &PrototypeRegistry,
    ) -> Result<(), Error> {
        // Redefinition replaces the old artifact; call sites always
        // resolve to the newest definition.
        self.functions
            .insert(function.proto.name.clone(), Rc::new(function));
        Ok(())
    }

    fn add_extern(&mut self, _proto: &Prototype) -> Result<(), Error> {
        // Nothing to load: extern symbols resolve lazily at call time
        // against the runtime support table.
        Ok(())
    }

    fn add_global(&mut self, global: Global, protos: &PrototypeRegistry) -> Result<(), Error> {
        let mut scopes = Scopes::new();
        let value = self.eval(&global.initializer, &mut scopes, protos)?;
        self.globals.insert(global.name, value);
        Ok(())
    }

    fn run_anonymous(
        &mut self,
        function: Function,
        protos: &PrototypeRegistry,
    ) -> Result<Option<f64>, Error> {
        let name = function.proto.name.clone();

        // Load the unit, invoke its entry point, then unload it no matter
        // how the invocation went, so repeated top-level expressions do
        // not accumulate dead artifacts.
        self.functions.insert(name.clone(), Rc::new(function));
        let result = self.call(&name, &[], protos);
        self.functions.remove(&name);

        result.map(Some)
    }

    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
