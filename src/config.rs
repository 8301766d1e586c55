use std::{env, path::PathBuf};

/// Call depth bound used unless configured otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100;
/// Environment variable holding extra library roots, in the platform's path
/// list syntax.
pub const PATH_VARIABLE: &str = "OX_PATH";
/// File extension of ox source units.
pub const SOURCE_EXTENSION: &str = "ox";

/// Runtime configuration.
///
/// `lib_paths` are the library roots searched, in order, by `import`.
/// `max_call_depth` bounds nested calls and imports together; exceeding it
/// raises `StackExhausted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Library roots, searched first to last.
    pub lib_paths:      Vec<PathBuf>,
    /// Maximum nesting of calls and imports.
    pub max_call_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { lib_paths:      vec![PathBuf::from(".")],
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}

impl RuntimeConfig {
    /// The default configuration extended with the roots listed in `OX_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(paths) = env::var_os(PATH_VARIABLE) {
            config.lib_paths.extend(env::split_paths(&paths));
        }
        config
    }

    /// Adds a library root searched before every existing one.
    #[must_use]
    pub fn with_lib_path_first(mut self, path: impl Into<PathBuf>) -> Self {
        self.lib_paths.insert(0, path.into());
        self
    }

    /// Adds a library root searched after every existing one.
    #[must_use]
    pub fn with_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lib_paths.push(path.into());
        self
    }

    /// Replaces the call depth bound.
    #[must_use]
    pub const fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{DEFAULT_MAX_CALL_DEPTH, RuntimeConfig};

    #[test]
    fn builders_order_library_roots() {
        let config = RuntimeConfig::default().with_lib_path("late")
                                             .with_lib_path_first("early")
                                             .with_max_call_depth(7);

        assert_eq!(config.lib_paths,
                   vec![PathBuf::from("early"), PathBuf::from("."), PathBuf::from("late")]);
        assert_eq!(config.max_call_depth, 7);
        assert_eq!(RuntimeConfig::default().max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }
}
