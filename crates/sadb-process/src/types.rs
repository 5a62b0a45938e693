//! Common types for adb invocations

use std::fmt;

/// Flag that addresses a command to one specific device
pub const SELECTOR_FLAG: &str = "-s";

/// Binary plus optional device selector that every command is issued against.
///
/// Immutable once built; device and server handles each own one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdbTarget {
    path: String,
    selector: Option<String>,
}

impl AdbTarget {
    /// Target the adb server without addressing a device
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            selector: None,
        }
    }

    /// Target one device, prepending `-s <selector>` to every command
    pub fn with_selector(path: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            selector: Some(selector.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Build the single command line for `args`.
    ///
    /// Tokens are joined with one space and are not escaped; empty `args`
    /// are dropped. An empty selector is kept as `''` so `-s` never takes
    /// the next argument as its value.
    pub fn command_line<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut tokens: Vec<&str> = vec![self.path.as_str()];
        if let Some(ref selector) = self.selector {
            tokens.push(SELECTOR_FLAG);
            tokens.push(if selector.is_empty() { "''" } else { selector });
        }
        tokens.extend(args.iter().map(|a| a.as_ref()).filter(|a| !a.is_empty()));
        tokens.join(" ")
    }
}

impl fmt::Display for AdbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selector {
            Some(ref selector) => write!(f, "{} {} {}", self.path, SELECTOR_FLAG, selector),
            None => write!(f, "{}", self.path),
        }
    }
}
