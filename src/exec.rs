//! Replacing the process image with the target command.

use std::convert::Infallible;
use std::ffi::CString;

use nix::unistd::execv;

use crate::err::LaunchError;

/// Upper bound on the argument vector, kept as an explicit guard.
pub const DEFAULT_MAX_ARGS: usize = 4096;

/// The target command, converted once into exec's argument vector.
/// Element 0 of both vectors is the path of the executable itself.
#[derive(Debug)]
pub struct Invocation {
    text: Vec<String>,
    argv: Vec<CString>,
}

impl Invocation {
    pub fn new(command: &[String], max_args: usize) -> Result<Invocation, LaunchError> {
        if command.is_empty() {
            return Err(LaunchError::Usage { detail: String::from("no command specified") });
        }
        if command.len() > max_args {
            return Err(LaunchError::TooManyArgs { count: command.len(), limit: max_args });
        }
        let argv = command
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes()).map_err(|_| LaunchError::Usage {
                    detail: format!("argument contains a NUL byte: {:?}", arg),
                })
            })
            .collect::<Result<Vec<CString>, LaunchError>>()?;
        Ok(Invocation { text: command.to_vec(), argv })
    }

    pub fn program(&self) -> &str {
        &self.text[0]
    }

    /// Replace this process with the target command.  The path is
    /// executed directly: no PATH search, no shell.  Does not return
    /// except to report that the exec itself failed, in which case the
    /// process still holds whatever identity was set before the call.
    pub fn exec(&self, verbose: bool) -> Result<Infallible, LaunchError> {
        if verbose {
            println!("executing: {}", self.text.join(" "));
        }
        match execv(&self.argv[0], &self.argv) {
            Ok(never) => match never {},
            Err(cause) => Err(LaunchError::ExecFailed { program: self.text[0].clone(), cause }),
        }
    }
}
