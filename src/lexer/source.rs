use std::collections::VecDeque;

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::errors::errors::{Error, ErrorKind};

/// Where the lexer's characters come from, selected once at session start.
///
/// File mode holds the whole input resident in memory and never blocks.
/// Interactive mode pulls one line at a time from a line editor, blocking
/// until the user provides more input or closes the stream.
pub enum CharSource {
    Buffer { chars: Vec<char>, pos: usize },
    Interactive(InteractiveSource),
}

impl CharSource {
    pub fn buffer(source: String) -> CharSource {
        CharSource::Buffer {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn interactive() -> Result<CharSource, Error> {
        Ok(CharSource::Interactive(InteractiveSource::new()?))
    }

    /// Returns the next character, or `None` once the stream is exhausted.
    pub fn next_char(&mut self) -> Option<char> {
        match self {
            CharSource::Buffer { chars, pos } => {
                let c = chars.get(*pos).copied();
                if c.is_some() {
                    *pos += 1;
                }
                c
            }
            CharSource::Interactive(source) => source.next_char(),
        }
    }
}

/// Line-buffered interactive input with history.
///
/// The `ready> ` prompt is shown whenever the buffered line runs dry and
/// another character is needed, so the user sees it exactly when the
/// session is waiting on them. Ctrl-D and Ctrl-C both end the stream.
pub struct InteractiveSource {
    editor: DefaultEditor,
    pending: VecDeque<char>,
    exhausted: bool,
}

impl InteractiveSource {
    pub fn new() -> Result<InteractiveSource, Error> {
        let editor = DefaultEditor::new().map_err(|error| {
            Error::semantic(ErrorKind::Io {
                message: format!("could not start interactive session: {}", error),
            })
        })?;

        Ok(InteractiveSource {
            editor,
            pending: VecDeque::new(),
            exhausted: false,
        })
    }

    fn next_char(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.pending.pop_front() {
                return Some(c);
            }
            if self.exhausted {
                return None;
            }

            match self.editor.readline("ready> ") {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.pending.extend(line.chars());
                    // The editor strips the terminating newline; the lexer
                    // needs it back as token-separating whitespace.
                    self.pending.push_back('\n');
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                    self.exhausted = true;
                }
                Err(error) => {
                    eprintln!("input error: {}", error);
                    self.exhausted = true;
                }
            }
        }
    }
}
