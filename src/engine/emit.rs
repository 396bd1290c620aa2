use std::{fs, path::PathBuf};

use crate::{
    ast::{
        ast::{Function, Global, Prototype},
        render::ToSource,
    },
    errors::errors::{Error, ErrorKind},
};

use super::backend::{Backend, PrototypeRegistry};

/// Batch-mode backend: instead of evaluating units as they arrive, every
/// accepted unit is rendered into one persistent module listing that is
/// written to the output target when the session ends.
///
/// A write failure is the one fatal error this backend can produce; it
/// surfaces from `finish` and terminates the process with a non-zero
/// status.
pub struct ModuleEmitter {
    output: PathBuf,
    listing: String,
}

impl ModuleEmitter {
    pub fn new(output: PathBuf) -> ModuleEmitter {
        ModuleEmitter {
            output,
            listing: String::new(),
        }
    }

    pub fn listing(&self) -> &str {
        &self.listing
    }

    fn push_unit(&mut self, unit: String) {
        self.listing.push_str(&unit);
        self.listing.push('\n');
    }
}

impl Backend for ModuleEmitter {
    fn add_function(
        &mut self,
        function: Function,
        _protos: &PrototypeRegistry,
    ) -> Result<(), Error> {
        self.push_unit(function.to_source());
        Ok(())
    }

    fn add_extern(&mut self, proto: &Prototype) -> Result<(), Error> {
        self.push_unit(format!("extern {}", proto.to_source()));
        Ok(())
    }

    fn add_global(&mut self, global: Global, _protos: &PrototypeRegistry) -> Result<(), Error> {
        self.push_unit(global.to_source());
        Ok(())
    }

    fn run_anonymous(
        &mut self,
        function: Function,
        _protos: &PrototypeRegistry,
    ) -> Result<Option<f64>, Error> {
        // Not invoked in batch mode; the wrapper becomes part of the
        // persistent module like any named function.
        self.push_unit(function.to_source());
        Ok(None)
    }

    fn finish(&mut self) -> Result<(), Error> {
        fs::write(&self.output, &self.listing).map_err(|error| {
            Error::semantic(ErrorKind::Io {
                message: format!("could not write {}: {}", self.output.display(), error),
            })
        })
    }
}
