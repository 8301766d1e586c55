use std::{mem, path::PathBuf};

use tracing::debug;

use crate::{
    ast::{Import, ImportMembers},
    config::SOURCE_EXTENSION,
    error::RuntimeError,
    interpreter::evaluator::core::{ExecResult, Runtime},
    source::Source,
};

impl Runtime {
    /// Finds the file of a dotted module path.
    ///
    /// `a.b` maps to `a/b.ox` relative to each library root, searched in
    /// order; the first root containing the file wins.
    #[must_use]
    pub fn resolve_library(&self, module: &[String]) -> Option<PathBuf> {
        let mut relative: PathBuf = module.iter().collect();
        relative.set_extension(SOURCE_EXTENSION);

        self.config
            .lib_paths
            .iter()
            .map(|root| root.join(&relative))
            .find(|candidate| {
                let found = candidate.is_file();
                debug!(path = %candidate.display(), found, "library candidate");
                found
            })
    }

    /// Executes an import.
    ///
    /// Pragma imports only affect parsing and do nothing here. A library is
    /// read, parsed and executed into the global namespace, outside of any
    /// call frame, every time it is imported. Nested imports count against
    /// the call depth bound. `import m.(a, b)` additionally requires that
    /// the library bound every listed name.
    ///
    /// # Returns
    /// `LibraryNotFound` if no root contains the module, `LibraryUnreadable`
    /// if it cannot be read, any error raised while executing it, and
    /// `UndefinedVariable` naming the first listed member left unbound.
    pub fn exec_import(&mut self, import: &Import) -> ExecResult<()> {
        if import.is_pragma() {
            return Ok(());
        }

        let module = import.path();
        let Some(path) = self.resolve_library(&import.module) else {
            return Err(self.error(RuntimeError::LibraryNotFound { module }, import.span));
        };
        let library = match Source::from_path(&path) {
            Ok(library) => library,
            Err(e) => {
                let kind = RuntimeError::LibraryUnreadable { module,
                                                             reason: e.to_string() };
                return Err(self.error(kind, import.span));
            },
        };

        let limit = self.config.max_call_depth;
        if self.depth >= limit {
            return Err(self.error(RuntimeError::StackExhausted { depth: limit }, import.span));
        }

        debug!(module = %module, path = %path.display(), "importing library");
        let frames = mem::take(&mut self.frames);
        self.depth += 1;
        let result = self.execute_source(library);
        self.depth -= 1;
        self.frames = frames;
        result?;

        if let Some(ImportMembers::Named(names)) = &import.members
           && let Some(missing) = names.iter().find(|name| !self.globals.contains_key(*name))
        {
            let kind = RuntimeError::UndefinedVariable { name: missing.clone() };
            return Err(self.error(kind, import.span));
        }

        Ok(())
    }
}
