//! Mapping user and group names to numeric ids, with optional
//! indirection through the environment.

use std::env;
use std::fmt;

use nix::unistd::{Gid, Group, Uid, User};

use crate::err::LaunchError;

/// Which identity database a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    User,
    Group,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdKind::User => f.write_str("user"),
            IdKind::Group => f.write_str("group"),
        }
    }
}

/// How the caller asked for one identity: by literal name, by the name
/// of an environment variable holding it, or not at all.
#[derive(Debug, Default, Clone)]
pub struct IdentityRequest {
    pub name: Option<String>,
    pub from_env: Option<String>,
}

impl IdentityRequest {
    /// The name to look up, after applying the precedence rule: a
    /// literal name always beats the environment indirection.  Returns
    /// `None` when the category is unconfigured.
    fn effective_name(&self, kind: IdKind, verbose: bool) -> Result<Option<String>, LaunchError> {
        if let Some(name) = &self.name {
            return Ok(Some(name.clone()));
        }
        let Some(var) = &self.from_env else {
            return Ok(None);
        };
        if verbose {
            println!("reading {} name from environment variable {}", kind, var);
        }
        match env::var(var) {
            Ok(name) => Ok(Some(name)),
            Err(_) => Err(LaunchError::MissingEnvVar { var: var.clone() }),
        }
    }
}

/// A user name successfully looked up in the password database.
#[derive(Debug, Clone)]
pub struct ResolvedUser {
    pub name: String,
    pub uid: Uid,
}

/// A group name successfully looked up in the group database.
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    pub name: String,
    pub gid: Gid,
}

/// Resolve the requested user, if any, to its uid.
///
/// A name that is simply absent from the database and a lookup that
/// fails outright are different failures; the caller's remedy differs.
pub fn resolve_user(
    req: &IdentityRequest,
    verbose: bool,
) -> Result<Option<ResolvedUser>, LaunchError> {
    let Some(name) = req.effective_name(IdKind::User, verbose)? else {
        return Ok(None);
    };
    if verbose {
        println!("user: {}", name);
    }
    let user = User::from_name(&name)
        .map_err(|cause| LaunchError::IdentityLookup {
            kind: IdKind::User,
            name: name.clone(),
            cause,
        })?
        .ok_or_else(|| LaunchError::UnknownId { kind: IdKind::User, name: name.clone() })?;
    if verbose {
        println!("uid: {}", user.uid);
    }
    Ok(Some(ResolvedUser { name, uid: user.uid }))
}

/// Resolve the requested group, if any, to its gid.
pub fn resolve_group(
    req: &IdentityRequest,
    verbose: bool,
) -> Result<Option<ResolvedGroup>, LaunchError> {
    let Some(name) = req.effective_name(IdKind::Group, verbose)? else {
        return Ok(None);
    };
    if verbose {
        println!("group: {}", name);
    }
    let group = Group::from_name(&name)
        .map_err(|cause| LaunchError::IdentityLookup {
            kind: IdKind::Group,
            name: name.clone(),
            cause,
        })?
        .ok_or_else(|| LaunchError::UnknownId { kind: IdKind::Group, name: name.clone() })?;
    if verbose {
        println!("gid: {}", group.gid);
    }
    Ok(Some(ResolvedGroup { name, gid: group.gid }))
}
