use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to start processor `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Processor `{command}` exited with {status}: {stderr}")]
    ProcessorFailed {
        command: String,
        status: String,
        stderr: String,
    },
}
