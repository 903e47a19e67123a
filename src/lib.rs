//! Shared logic for the privrun launcher: identity resolution, the
//! privilege transition sequence, and the final image replacement.

#![cfg(unix)]

pub use libc::{gid_t, uid_t};

mod err;
pub use err::*;

mod ident;
pub use ident::*;

mod privs;
pub use privs::*;

mod exec;
pub use exec::*;
