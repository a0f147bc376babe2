//! Running commands to capture their help output.
//!
//! [`HelpProbe`] is the seam between the harvester and the outside world:
//! [`CommandProbe`] runs real subprocesses, while tests can pass any closure
//! mapping an invocation to help text.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::{DiscoveryError, Result};

/// Flag appended to every invocation by default.
pub const DEFAULT_HELP_FLAG: &str = "--help";

/// Source of help text for a command invocation.
///
/// `invocation` is the command followed by its subcommand path, without the
/// help flag (e.g. `["git-branchless", "move"]`).
pub trait HelpProbe {
    fn help_text(&mut self, invocation: &[String]) -> Result<String>;
}

impl<F> HelpProbe for F
where
    F: FnMut(&[String]) -> Result<String>,
{
    fn help_text(&mut self, invocation: &[String]) -> Result<String> {
        self(invocation)
    }
}

/// Probes help by running `<invocation...> --help` as a subprocess.
///
/// Stdin is closed and stdout/stderr are captured. The child runs with an
/// environment that keeps pagers and colors out of the output. Without a
/// timeout, a hung command blocks forever.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use helptree_discovery::probe::{CommandProbe, HelpProbe};
///
/// let mut probe = CommandProbe::new().with_timeout(Duration::from_secs(5));
/// let help = probe.help_text(&["cargo".to_string(), "build".to_string()]).unwrap();
/// assert!(help.contains("Usage"));
/// ```
#[derive(Debug, Clone)]
pub struct CommandProbe {
    help_flag: String,
    timeout: Option<Duration>,
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self {
            help_flag: DEFAULT_HELP_FLAG.to_string(),
            timeout: None,
        }
    }
}

impl CommandProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `flag` instead of `--help`.
    pub fn with_help_flag(mut self, flag: &str) -> Self {
        self.help_flag = flag.to_string();
        self
    }

    /// Kills commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn help_flag(&self) -> &str {
        &self.help_flag
    }
}

impl HelpProbe for CommandProbe {
    fn help_text(&mut self, invocation: &[String]) -> Result<String> {
        let Some((program, args)) = invocation.split_first() else {
            return Err(DiscoveryError::EmptyInvocation);
        };
        let mut argv = invocation.to_vec();
        argv.push(self.help_flag.clone());

        let mut command = Command::new(program);
        command
            .args(args)
            .arg(&self.help_flag)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in default_probe_env() {
            command.env(key, value);
        }

        debug!(command = ?argv, "Probing help");
        let mut child = command.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DiscoveryError::CommandNotFound {
                    program: program.clone(),
                }
            } else {
                DiscoveryError::Io {
                    invocation: argv.clone(),
                    source,
                }
            }
        })?;

        // Drain both pipes in the background so a chatty child cannot fill a
        // pipe buffer and block before exiting.
        let stdout_thread = drain(child.stdout.take());
        let stderr_thread = drain(child.stderr.take());

        let waited: io::Result<Option<ExitStatus>> = match self.timeout {
            Some(timeout) => child.wait_timeout(timeout),
            None => child.wait().map(Some),
        };
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                debug!(command = ?argv, "Help command timed out, killing process");
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipes open; the readers are
                // detached rather than joined.
                drop(stdout_thread);
                drop(stderr_thread);
                return Err(DiscoveryError::Timeout {
                    invocation: argv,
                    timeout_ms: self.timeout.unwrap_or_default().as_millis(),
                });
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                drop(stdout_thread);
                drop(stderr_thread);
                return Err(DiscoveryError::Io {
                    invocation: argv,
                    source,
                });
            }
        };

        let stdout = collect(stdout_thread).map_err(|source| DiscoveryError::Io {
            invocation: argv.clone(),
            source,
        })?;
        let stderr = collect(stderr_thread).unwrap_or_default();

        if !status.success() {
            return Err(DiscoveryError::CommandFailed {
                invocation: argv,
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        debug!(command = ?argv, length = stdout.len(), "Got help output");
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

type PipeReader = JoinHandle<io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).map(|_| buf)
        })
    })
}

fn collect(reader: Option<PipeReader>) -> io::Result<Vec<u8>> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("pipe reader thread panicked"))?,
        None => Ok(Vec::new()),
    }
}

fn default_probe_env() -> Vec<(&'static str, &'static str)> {
    vec![
        // Plain text only; help generators honour these.
        ("NO_COLOR", "1"),
        ("CLICOLOR", "0"),
        ("TERM", "dumb"),
        // Avoid interactive pagers when commands route help through pager tools.
        ("PAGER", "cat"),
        ("MANPAGER", "cat"),
        ("GIT_PAGER", "cat"),
    ]
}
