use super::ast::{Expr, Function, Global, OperatorKind, Prototype};

/// Renders a node back to canonical Kalos source text.
///
/// This is the human-readable form of a compiled unit: the driver echoes
/// it after accepting a definition and the batch emitter writes it into
/// the persistent module listing. Binary expressions are parenthesized so
/// the rendered text is unambiguous regardless of which user operators
/// exist when it is read back.
pub trait ToSource {
    fn to_source(&self) -> String;
}

impl ToSource for Expr {
    fn to_source(&self) -> String {
        match self {
            Expr::Number(value) => format!("{}", value),
            Expr::Variable(name) => name.clone(),
            Expr::Unary { op, operand } => format!("{}{}", op, operand.to_source()),
            Expr::Binary { op, lhs, rhs } => {
                format!("({} {} {})", lhs.to_source(), op, rhs.to_source())
            }
            Expr::Call { callee, args } => {
                let args = args
                    .iter()
                    .map(ToSource::to_source)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", callee, args)
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => format!(
                "if {} then {} else {}",
                cond.to_source(),
                then_branch.to_source(),
                else_branch.to_source()
            ),
            Expr::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                let step = match step {
                    Some(step) => format!(", {}", step.to_source()),
                    None => String::new(),
                };
                format!(
                    "for {} = {}, {}{} in {}",
                    var,
                    start.to_source(),
                    end.to_source(),
                    step,
                    body.to_source()
                )
            }
            Expr::Var { bindings, body } => {
                let bindings = bindings
                    .iter()
                    .map(|(name, init)| match init {
                        Some(init) => format!("{} = {}", name, init.to_source()),
                        None => name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("var {} in {}", bindings, body.to_source())
            }
        }
    }
}

impl ToSource for Prototype {
    fn to_source(&self) -> String {
        let params = self.params.join(" ");
        match self.kind {
            OperatorKind::Plain => format!("{}({})", self.name, params),
            OperatorKind::Unary => format!("{} ({})", self.name, params),
            OperatorKind::Binary => {
                format!("{} {} ({})", self.name, self.binary_precedence(), params)
            }
        }
    }
}

impl ToSource for Function {
    fn to_source(&self) -> String {
        format!("def {} {}", self.proto.to_source(), self.body.to_source())
    }
}

impl ToSource for Global {
    fn to_source(&self) -> String {
        format!("global {} = {}", self.name, self.initializer.to_source())
    }
}
