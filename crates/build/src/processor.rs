use crate::BuildError;
use bytes::Bytes;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Replaces `$NAME` occurrences in command arguments with the matching variable
pub(crate) fn resolve_args(args: &[String], vars: &[(&str, String)]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${}", key), value);
            }
            result
        })
        .collect()
}

/// Runs `command` with `input` on stdin and returns its stdout
pub(crate) async fn run_processor(
    command: &[String],
    input: Bytes,
    cwd: &Path,
    vars: &[(&str, String)],
) -> Result<Bytes, BuildError> {
    let resolved = resolve_args(command, vars);
    let display_cmd = resolved.join(" ");

    let Some((program, args)) = resolved.split_first() else {
        return Err(BuildError::Spawn {
            command: display_cmd,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    tracing::debug!("processor: running `{}`", display_cmd);

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .envs(vars.iter().map(|(key, value)| (*key, value.as_str())))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| BuildError::Spawn {
            command: display_cmd.clone(),
            source,
        })?;

    // Feed stdin concurrently so a chatty processor cannot deadlock on a full stdout pipe
    let writer = child.stdin.take().map(|mut stdin| {
        tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        })
    });

    let output = child.wait_with_output().await?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(e) => tracing::warn!("processor: stdin writer for `{}` panicked: {}", display_cmd, e),
            _ => {}
        }
    }

    if !output.status.success() {
        return Err(BuildError::ProcessorFailed {
            command: display_cmd,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(Bytes::from(output.stdout))
}
