//! The privilege transition sequence.
//!
//! At most two changes are ever made, and always in the same order:
//! group first, then user.  Lowering the user identity first could
//! cost the process the authority to change its group at all, so the
//! ordering is not negotiable.  Neither change is ever rolled back; a
//! rejected transition is a security-relevant anomaly and the only
//! sane response is to stop immediately with whatever identity the
//! process had reached.

use nix::unistd::{getuid, setgid, setuid};

use crate::err::LaunchError;
use crate::ident::{IdKind, ResolvedGroup, ResolvedUser};

/// One pending identity change.
#[derive(Debug, Clone)]
pub enum Transition {
    Group(ResolvedGroup),
    User(ResolvedUser),
}

impl Transition {
    /// Apply this change to the current process.  Terminal on failure.
    pub fn apply(&self) -> Result<(), LaunchError> {
        match self {
            Transition::Group(g) => setgid(g.gid).map_err(|cause| LaunchError::SetIdFailed {
                kind: IdKind::Group,
                name: g.name.clone(),
                id: g.gid.as_raw(),
                cause,
            }),
            Transition::User(u) => setuid(u.uid).map_err(|cause| LaunchError::SetIdFailed {
                kind: IdKind::User,
                name: u.name.clone(),
                id: u.uid.as_raw(),
                cause,
            }),
        }
    }
}

/// Refuse to do anything unless we are actually root.  The check is on
/// the real uid, and it applies even when no identity change was
/// requested: running this program unprivileged is always a mistake.
pub fn ensure_superuser() -> Result<(), LaunchError> {
    let uid = getuid();
    if uid.is_root() {
        Ok(())
    } else {
        Err(LaunchError::NotSuperuser { uid })
    }
}

/// Order the requested changes into the sequence they must happen in.
/// Unconfigured categories contribute nothing; an empty plan means the
/// command runs with the caller's own identity, elevated rights and
/// all, which is the documented default.
pub fn plan(group: Option<ResolvedGroup>, user: Option<ResolvedUser>) -> Vec<Transition> {
    let mut steps = Vec::with_capacity(2);
    if let Some(g) = group {
        steps.push(Transition::Group(g));
    }
    if let Some(u) = user {
        steps.push(Transition::User(u));
    }
    steps
}

/// Apply every step in order, stopping at the first rejection.
pub fn apply_all(steps: &[Transition], verbose: bool) -> Result<(), LaunchError> {
    for step in steps {
        if verbose {
            match step {
                Transition::Group(g) => println!("setting gid {} ({})", g.gid, g.name),
                Transition::User(u) => println!("setting uid {} ({})", u.uid, u.name),
            }
        }
        step.apply()?;
    }
    Ok(())
}
