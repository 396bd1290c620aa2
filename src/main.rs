use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser as ClapParser;

use kalos::{
    driver::driver::Driver,
    engine::{emit::ModuleEmitter, eval::Evaluator},
    lexer::{lexer::Lexer, source::CharSource},
    parser::parser::Parser,
};

#[derive(ClapParser)]
#[command(name = "kalos", version = "1.0", about = "The Kalos language front end")]
struct Cli {
    /// Source file to run. Without one, an interactive session starts.
    input: Option<PathBuf>,

    /// Emit the session as a module listing to FILE instead of
    /// evaluating it.
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (source, name) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => (CharSource::buffer(text), path.display().to_string()),
            Err(error) => {
                eprintln!("error: could not read {}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        },
        None => match CharSource::interactive() {
            Ok(source) => (source, "<stdin>".to_string()),
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        },
    };

    let parser = Parser::new(Lexer::new(source, &name));

    let result = match cli.output {
        Some(output) => Driver::new(parser, ModuleEmitter::new(output), false).run(),
        None => Driver::new(parser, Evaluator::new(), true).run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
