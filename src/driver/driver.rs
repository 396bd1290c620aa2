use crate::{
    ast::render::ToSource,
    engine::backend::{Backend, PrototypeRegistry},
    errors::errors::Error,
    lexer::tokens::Token,
    parser::{
        items::{parse_definition, parse_extern, parse_global, parse_top_level_expr},
        parser::Parser,
    },
};

/// The interpreter loop: reads one top-level unit at a time, hands it to
/// the backend, and loops until the token stream ends.
///
/// This is the single error-recovery point of the session. A unit that
/// fails to parse prints one diagnostic and discards one token before the
/// next iteration, so the parser cannot wedge on the same token forever.
/// A unit that parses but fails in the backend prints the diagnostic and
/// moves on without skipping anything; the parser is already positioned
/// at the next unit.
pub struct Driver<B: Backend> {
    parser: Parser,
    backend: B,
    protos: PrototypeRegistry,
    echo: bool,
}

impl<B: Backend> Driver<B> {
    /// When `echo` is set, every accepted unit is printed back in its
    /// rendered form, which is what the interactive session wants and the
    /// batch session does not.
    pub fn new(parser: Parser, backend: B, echo: bool) -> Driver<B> {
        Driver {
            parser,
            backend,
            protos: PrototypeRegistry::new(),
            echo,
        }
    }

    pub fn prototypes(&self) -> &PrototypeRegistry {
        &self.protos
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs the session to end of input, then flushes the backend. Only
    /// the flush can fail; everything before it is recovered in place.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            match self.parser.current() {
                Token::Eof => break,
                Token::Char(';') => {
                    // Unit separator, ignored by the grammar.
                    self.parser.advance();
                }
                Token::Def => self.handle_definition(),
                Token::Extern => self.handle_extern(),
                Token::Global => self.handle_global(),
                _ => self.handle_top_level_expression(),
            }
        }

        self.backend.finish()
    }

    /// Prints the diagnostic and discards the offending token.
    fn recover(&mut self, error: Error) {
        eprintln!("{}", error);
        self.parser.advance();
    }

    fn report(&self, error: Error) {
        eprintln!("{}", error);
    }

    fn echo_unit(&self, what: &str, rendered: &str) {
        if self.echo {
            eprintln!("Read {}: {}", what, rendered);
        }
    }

    fn handle_definition(&mut self) {
        let function = match parse_definition(&mut self.parser) {
            Ok(function) => function,
            Err(error) => return self.recover(error),
        };

        let rendered = function.to_source();
        self.protos.register(function.proto.clone());
        match self.backend.add_function(function, &self.protos) {
            Ok(()) => self.echo_unit("function definition", &rendered),
            Err(error) => self.report(error),
        }
    }

    fn handle_extern(&mut self) {
        let proto = match parse_extern(&mut self.parser) {
            Ok(proto) => proto,
            Err(error) => return self.recover(error),
        };

        let rendered = proto.to_source();
        match self.backend.add_extern(&proto) {
            Ok(()) => {
                self.protos.register(proto);
                self.echo_unit("extern", &rendered);
            }
            Err(error) => self.report(error),
        }
    }

    fn handle_global(&mut self) {
        let global = match parse_global(&mut self.parser) {
            Ok(global) => global,
            Err(error) => return self.recover(error),
        };

        let rendered = global.to_source();
        match self.backend.add_global(global, &self.protos) {
            Ok(()) => self.echo_unit("global", &rendered),
            Err(error) => self.report(error),
        }
    }

    fn handle_top_level_expression(&mut self) {
        let function = match parse_top_level_expr(&mut self.parser) {
            Ok(function) => function,
            Err(error) => return self.recover(error),
        };

        match self.backend.run_anonymous(function, &self.protos) {
            Ok(Some(value)) => {
                if self.echo {
                    eprintln!("Evaluated to {}", value);
                }
            }
            Ok(None) => {}
            Err(error) => self.report(error),
        }
    }
}
