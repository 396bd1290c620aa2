//! End-to-end tests for the driver loop.
//!
//! These drive full sessions through the real parser and assert on what
//! reaches the backend, including how the session behaves around errors.

use std::{env, fs, path::PathBuf};

use kalos::{
    ast::{
        ast::{Function, Global, Prototype},
        render::ToSource,
    },
    driver::driver::Driver,
    engine::{
        backend::{Backend, PrototypeRegistry},
        emit::ModuleEmitter,
        eval::Evaluator,
    },
    errors::errors::Error,
    lexer::{lexer::Lexer, source::CharSource},
    parser::parser::Parser,
};

/// Records every unit the driver accepts, in order.
#[derive(Default)]
struct RecordingBackend {
    accepted: Vec<String>,
}

impl Backend for RecordingBackend {
    fn add_function(
        &mut self,
        function: Function,
        _protos: &PrototypeRegistry,
    ) -> Result<(), Error> {
        self.accepted.push(format!("def {}", function.proto.name));
        Ok(())
    }

    fn add_extern(&mut self, proto: &Prototype) -> Result<(), Error> {
        self.accepted.push(format!("extern {}", proto.name));
        Ok(())
    }

    fn add_global(&mut self, global: Global, _protos: &PrototypeRegistry) -> Result<(), Error> {
        self.accepted.push(format!("global {}", global.name));
        Ok(())
    }

    fn run_anonymous(
        &mut self,
        function: Function,
        _protos: &PrototypeRegistry,
    ) -> Result<Option<f64>, Error> {
        self.accepted.push(format!("expr {}", function.body.to_source()));
        Ok(Some(0.0))
    }

    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

fn driver_for<B: Backend>(source: &str, backend: B) -> Driver<B> {
    let lexer = Lexer::new(CharSource::buffer(source.to_string()), "test.kl");
    Driver::new(Parser::new(lexer), backend, false)
}

#[test]
fn test_driver_dispatches_every_unit_kind() {
    let source = "def id(x) x\nextern sin(x)\nglobal g = 1\nid(g);";
    let mut driver = driver_for(source, RecordingBackend::default());

    driver.run().unwrap();

    assert_eq!(
        driver.backend().accepted,
        vec!["def id", "extern sin", "global g", "expr id(g)"]
    );
}

#[test]
fn test_driver_recovers_from_parse_error() {
    // The broken definition is discarded; the units after it still land.
    let source = "def broken(x x+1\nextern ok()";
    let mut driver = driver_for(source, RecordingBackend::default());

    driver.run().unwrap();

    assert!(driver.prototypes().lookup("broken").is_none());
    assert!(driver.prototypes().lookup("ok").is_some());
    assert!(driver
        .backend()
        .accepted
        .contains(&"extern ok".to_string()));
}

#[test]
fn test_driver_continues_after_semantic_error() {
    // The first expression fails in the backend; the definition and the
    // call after it are unaffected.
    let source = "undeclared\ndef f(x) x + 1\nf(1);";
    let mut driver = driver_for(source, Evaluator::new());

    driver.run().unwrap();

    assert!(driver.prototypes().lookup("f").is_some());
}

#[test]
fn test_failed_definition_registers_no_prototype() {
    let source = "def binary% 101 (a b) a\ndef g() 1";
    let mut driver = driver_for(source, RecordingBackend::default());

    driver.run().unwrap();

    assert!(driver.prototypes().lookup("binary%").is_none());
    assert!(driver.prototypes().lookup("g").is_some());
}

#[test]
fn test_user_operator_spans_units() {
    // The operator defined by the first unit must parse in the second.
    let source = "def binary| 5 (a b) a + b\n1 | 2;";
    let mut driver = driver_for(source, RecordingBackend::default());

    driver.run().unwrap();

    assert_eq!(
        driver.backend().accepted,
        vec!["def binary|", "expr (1 | 2)"]
    );
}

fn temp_output(tag: &str) -> PathBuf {
    env::temp_dir().join(format!("kalos-{}-{}.kl", tag, std::process::id()))
}

#[test]
fn test_emitter_writes_module_listing() {
    let output = temp_output("emit");
    let source = "def double(x) x*2\nextern printd(x)\nglobal g = 1\ndouble(2);";
    let mut driver = driver_for(source, ModuleEmitter::new(output.clone()));

    driver.run().unwrap();

    let listing = fs::read_to_string(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert!(listing.contains("def double(x) (x * 2)"));
    assert!(listing.contains("extern printd(x)"));
    assert!(listing.contains("global g = 1"));
    assert!(listing.contains("def __anon_expr() double(2)"));
}

#[test]
fn test_emitter_keeps_units_in_session_order() {
    let output = temp_output("order");
    let source = "extern first()\ndef second() 2";
    let mut driver = driver_for(source, ModuleEmitter::new(output.clone()));

    driver.run().unwrap();

    let listing = fs::read_to_string(&output).unwrap();
    fs::remove_file(&output).unwrap();

    let first = listing.find("first").unwrap();
    let second = listing.find("second").unwrap();
    assert!(first < second);
}

#[test]
fn test_emitter_reports_unwritable_output() {
    let output = PathBuf::from("/nonexistent-dir/out.kl");
    let mut driver = driver_for("def f() 1", ModuleEmitter::new(output));

    assert!(driver.run().is_err());
}
