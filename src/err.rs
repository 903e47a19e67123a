//! Error type and exit-code policy shared by all of the components.
//! Every one of these is terminal: nothing is retried, nothing is
//! downgraded, and the program stops at the first failure.

use std::error::Error;
use std::fmt;

use nix::errno::Errno;
use nix::unistd::Uid;

use crate::ident::IdKind;

#[derive(Debug)]
pub enum LaunchError {
    /// An environment variable named on the command line is unset (or
    /// does not hold a usable name).
    MissingEnvVar { var: String },
    /// The name exists nowhere in the system identity database.
    UnknownId { kind: IdKind, name: String },
    /// The database query itself failed, as opposed to succeeding and
    /// finding nothing.
    IdentityLookup { kind: IdKind, name: String, cause: Errno },
    /// Identity changes are only possible for root.
    NotSuperuser { uid: Uid },
    /// The kernel rejected setgid or setuid.
    SetIdFailed { kind: IdKind, name: String, id: u32, cause: Errno },
    /// execv failed; the target command never ran.
    ExecFailed { program: String, cause: Errno },
    /// The argument list exceeds the safety cap.
    TooManyArgs { count: usize, limit: usize },
    /// Malformed invocation of privrun itself.
    Usage { detail: String },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LaunchError::MissingEnvVar { var } => {
                write!(f, "environment variable {} not found", var)
            }
            LaunchError::UnknownId { kind, name } => {
                write!(f, "unknown {} {}", kind, name)
            }
            LaunchError::IdentityLookup { kind, name, cause } => {
                write!(f, "while looking up {} {}: {}", kind, name, cause)
            }
            LaunchError::NotSuperuser { uid } => {
                write!(f, "must be root to change identities (running as uid {})", uid)
            }
            LaunchError::SetIdFailed { kind, name, id, cause } => {
                write!(f, "could not set {} id to {} ({}): {}", kind, id, name, cause)
            }
            LaunchError::ExecFailed { program, cause } => {
                write!(f, "could not execute {}: {}", program, cause)
            }
            LaunchError::TooManyArgs { count, limit } => {
                write!(f, "too many command line arguments ({}, limit {})", count, limit)
            }
            LaunchError::Usage { detail } => {
                write!(f, "{}", detail)
            }
        }
    }
}

impl Error for LaunchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LaunchError::IdentityLookup { cause, .. } => Some(cause),
            LaunchError::SetIdFailed { cause, .. } => Some(cause),
            LaunchError::ExecFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl LaunchError {
    /// Process exit status for this failure.  Usage problems exit 2;
    /// everything that goes wrong while actually resolving, switching,
    /// or exec'ing exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Usage { .. } => 2,
            _ => 1,
        }
    }
}
