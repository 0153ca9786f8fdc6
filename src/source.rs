//! Name sources
//!
//! A name source answers "which reconfigurable nodes exist right now". It is
//! the only part of the panel that talks to the outside world, and the only
//! call that may block.

use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{SelectorError, SelectorResult};

/// Default bound on a discovery command
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Service suffix that marks a node as reconfigurable
pub const RECONFIGURE_SERVICE_SUFFIX: &str = "/set_parameters";

/// Supplies the current set of hierarchical names
pub trait NameSource {
    /// Discover names, in the order the tree should show them
    fn discover(&mut self) -> SelectorResult<Vec<String>>;

    /// Human readable description used in errors and logs
    fn describe(&self) -> String;
}

impl<S: NameSource + ?Sized> NameSource for Box<S> {
    fn discover(&mut self) -> SelectorResult<Vec<String>> {
        (**self).discover()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A fixed list of names
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    names: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the list returned by the next discovery
    pub fn set_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
    }
}

impl NameSource for StaticSource {
    fn discover(&mut self) -> SelectorResult<Vec<String>> {
        Ok(self.names.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} names)", self.names.len())
    }
}

/// Names read from a file on every discovery.
///
/// `.json` files hold an array of strings; anything else is one name per
/// line with blank lines and `#` comments ignored.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameSource for FileSource {
    fn discover(&mut self) -> SelectorResult<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SelectorError::SourceUnavailable {
                    source_desc: self.describe(),
                    message: "file not found".to_string(),
                }
            } else {
                SelectorError::Io(e)
            }
        })?;

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let names: Vec<String> = serde_json::from_str(&content)?;
            Ok(names)
        } else {
            Ok(parse_lines(&content))
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Names printed by an external discovery command, one per line
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    service_suffix: Option<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            service_suffix: None,
        }
    }

    /// Split a command line on whitespace; `None` when it is blank
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).args(parts))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep only lines ending in `suffix`, with the suffix stripped
    pub fn service_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.service_suffix = Some(suffix.into());
        self
    }

    fn wait_with_timeout(&self, child: &mut Child) -> SelectorResult<std::process::ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                // Already exited between the check and the kill is fine
                let _ = child.kill();
                let _ = child.wait();
                return Err(SelectorError::SourceTimeout {
                    source_desc: self.describe(),
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn collect_output(
        &self,
        handle: thread::JoinHandle<io::Result<Vec<u8>>>,
        stream: &str,
    ) -> SelectorResult<String> {
        let unavailable = |message: String| SelectorError::SourceUnavailable {
            source_desc: self.describe(),
            message,
        };
        let bytes = handle
            .join()
            .map_err(|_| unavailable(format!("reader for {} panicked", stream)))?
            .map_err(|e| unavailable(format!("cannot read {}: {}", stream, e)))?;
        String::from_utf8(bytes)
            .map_err(|_| unavailable(format!("{} is not valid UTF-8", stream)))
    }
}

impl NameSource for CommandSource {
    fn discover(&mut self) -> SelectorResult<Vec<String>> {
        log::debug!("running discovery {}", self.describe());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SelectorError::SourceUnavailable {
                source_desc: self.describe(),
                message: e.to_string(),
            })?;

        // Drain both pipes off-thread so a chatty child cannot fill them and stall
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the drain threads are left detached; a grandchild may
        // still hold the pipes open
        let status = self.wait_with_timeout(&mut child)?;
        let stdout = self.collect_output(stdout, "stdout")?;
        let stderr = self.collect_output(stderr, "stderr")?;

        if !status.success() {
            let message = match stderr.trim() {
                "" => format!("exited with {}", status),
                err => err.to_string(),
            };
            return Err(SelectorError::SourceUnavailable {
                source_desc: self.describe(),
                message,
            });
        }

        let lines = parse_lines(&stdout);
        Ok(match &self.service_suffix {
            Some(suffix) => reconfigure_names(lines, suffix),
            None => lines,
        })
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            format!("command `{}`", self.program)
        } else {
            format!("command `{} {}`", self.program, self.args.join(" "))
        }
    }
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> thread::JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut reader) = reader {
            reader.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

/// One name per non-blank line, `#` starts a comment line
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Names of the nodes owning a service that ends in `suffix`
pub fn reconfigure_names<I, S>(services: I, suffix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    services
        .into_iter()
        .filter_map(|s| s.as_ref().strip_suffix(suffix).map(str::to_string))
        .filter(|name| !name.is_empty())
        .collect()
}
