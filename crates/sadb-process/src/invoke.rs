//! Running one adb command line and classifying its outcome

use crate::{AdbError, AdbTarget, Result};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

/// Raw outcome of a command that ran to completion
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    /// Combined stdout/stderr, untrimmed
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Run `args` against `target` and return its trimmed output.
///
/// Exit status 0 is success. Any other status, or a failure to start the
/// shell, is [`AdbError::CommandFailed`]. When `timeout` elapses first the
/// process group is killed and [`AdbError::TimeoutExpired`] is returned.
pub async fn invoke<S: AsRef<str>>(
    target: &AdbTarget,
    args: &[S],
    timeout: Option<Duration>,
) -> Result<String> {
    let result = run(target, args, timeout).await?;
    let output = trim_output(&result.output).to_string();

    if !result.success() {
        return Err(AdbError::CommandFailed {
            selector: target.selector().map(str::to_string),
            command: target.command_line(args),
            status: result.code(),
            output,
        });
    }

    Ok(output)
}

/// Run `args` against `target` without judging the exit status.
///
/// Only spawn failures and timeouts are errors here; callers that just need
/// to probe whether something succeeds look at [`CommandOutput::success`].
pub async fn run<S: AsRef<str>>(
    target: &AdbTarget,
    args: &[S],
    timeout: Option<Duration>,
) -> Result<CommandOutput> {
    let command = target.command_line(args);
    tracing::debug!("Running: {}", command);

    let mut child = shell_command(&command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| AdbError::CommandFailed {
            selector: target.selector().map(str::to_string),
            command: command.clone(),
            status: None,
            output: e.to_string(),
        })?;

    let collected = match timeout {
        Some(limit) => match tokio::time::timeout(limit, collect(&mut child)).await {
            Ok(collected) => collected,
            Err(_) => {
                terminate(&mut child).await;
                tracing::warn!("Timed out after {:?}: {}", limit, command);
                return Err(AdbError::TimeoutExpired {
                    selector: target.selector().map(str::to_string),
                    command,
                    timeout: limit,
                });
            }
        },
        None => collect(&mut child).await,
    };

    let (status, stdout, stderr) = collected.map_err(|e| AdbError::CommandFailed {
        selector: target.selector().map(str::to_string),
        command: command.clone(),
        status: None,
        output: e.to_string(),
    })?;

    let mut output = String::from_utf8_lossy(&stdout).to_string();
    output.push_str(&String::from_utf8_lossy(&stderr));
    tracing::debug!("Exited with {}: {}", status, command);

    Ok(CommandOutput { status, output })
}

/// Strip trailing carriage returns and newlines
pub fn trim_output(output: &str) -> &str {
    output.trim_end_matches(|c| c == '\r' || c == '\n')
}

/// Shell that interprets the joined command line, stderr folded into stdout.
///
/// The child leads its own process group so a timeout can take down
/// everything the shell started.
#[cfg(unix)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(format!("exec 2>&1; {}", line));
    cmd.process_group(0);
    cmd
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(format!("{} 2>&1", line));
    cmd
}

/// Drain both pipes, then reap the child
async fn collect(child: &mut Child) -> std::io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    let (stdout, stderr) = tokio::try_join!(read_all(stdout.as_mut()), read_all(stderr.as_mut()))?;
    let status = child.wait().await?;

    Ok((status, stdout, stderr))
}

async fn read_all<R: AsyncRead + Unpin>(stream: Option<&mut R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(stream) = stream {
        stream.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Kill the whole process group, then kill and reap the direct child
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            tracing::debug!("killpg({}) failed: {}", pid, e);
        }
    }

    if let Err(e) = child.kill().await {
        tracing::debug!("Failed to kill timed out child: {}", e);
    }
}
