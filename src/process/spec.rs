//! Command descriptions
//!
//! A [`CommandSpec`] is an immutable description of one external command:
//! argv, working directory, environment overrides, and an optional timeout.
//! Construction goes through a consuming builder; once built, a spec can be
//! run any number of times.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Immutable description of an external command to execute
#[derive(Debug, Clone)]
pub struct CommandSpec {
    argv: Vec<String>,
    working_dir: Option<PathBuf>,
    env: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl CommandSpec {
    /// Create a spec for a program with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            argv: vec![program.into()],
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a spec from a full argv (program + arguments)
    ///
    /// An empty argv is accepted here and rejected at run time, so callers
    /// assembling argv dynamically get a typed failure instead of a panic.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a spec that runs `command` through the platform shell
    pub fn shell(command: impl Into<String>) -> Self {
        #[cfg(unix)]
        let argv = vec!["sh".to_string(), "-c".to_string(), command.into()];
        #[cfg(not(unix))]
        let argv = vec!["cmd".to_string(), "/C".to_string(), command.into()];

        Self {
            argv,
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment override, merged over the inherited environment
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add several environment overrides
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self.env.insert(key.into(), value.into());
        }
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout in seconds
    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    /// The full argv (program + arguments)
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// The program, if the spec has one
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// The working directory, if set
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// The environment overrides
    pub fn env_overrides(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// The configured timeout, if any
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_new() {
        let spec = CommandSpec::new("echo");

        assert_eq!(spec.argv(), &["echo"]);
        assert_eq!(spec.program(), Some("echo"));
        assert!(spec.working_dir().is_none());
        assert!(spec.env_overrides().is_empty());
        assert!(spec.deadline().is_none());
    }

    #[test]
    fn test_spec_builder() {
        let spec = CommandSpec::new("make")
            .arg("build")
            .args(["-j", "4"])
            .current_dir("/tmp")
            .env("CC", "clang")
            .envs([("A", "1"), ("B", "2")])
            .timeout_secs(60);

        assert_eq!(spec.argv(), &["make", "build", "-j", "4"]);
        assert_eq!(spec.working_dir(), Some(Path::new("/tmp")));
        assert_eq!(spec.env_overrides().get("CC"), Some(&"clang".to_string()));
        assert_eq!(spec.env_overrides().get("B"), Some(&"2".to_string()));
        assert_eq!(spec.deadline(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_spec_from_argv() {
        let spec = CommandSpec::from_argv(vec!["echo", "hello", "world"]);

        assert_eq!(spec.argv(), &["echo", "hello", "world"]);
        assert_eq!(spec.program(), Some("echo"));
    }

    #[test]
    fn test_spec_from_empty_argv() {
        let spec = CommandSpec::from_argv(Vec::<String>::new());

        assert!(spec.argv().is_empty());
        assert!(spec.program().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_spec_shell() {
        let spec = CommandSpec::shell("echo out && echo err 1>&2");

        assert_eq!(spec.program(), Some("sh"));
        assert_eq!(spec.argv()[1], "-c");
        assert_eq!(spec.argv()[2], "echo out && echo err 1>&2");
    }

    #[test]
    fn test_spec_display() {
        let spec = CommandSpec::new("echo").arg("hello");

        assert_eq!(spec.to_string(), "echo hello");
    }

    #[test]
    fn test_spec_timeout_override_styles() {
        let a = CommandSpec::new("sleep").timeout(Duration::from_millis(100));
        let b = CommandSpec::new("sleep").timeout_secs(1);

        assert_eq!(a.deadline(), Some(Duration::from_millis(100)));
        assert_eq!(b.deadline(), Some(Duration::from_secs(1)));
    }
}
