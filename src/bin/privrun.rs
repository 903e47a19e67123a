/* Run a command under a different user and group identity.
 *
 * Copyright © 2014 Zack Weinberg
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 * http://www.apache.org/licenses/LICENSE-2.0
 * There is NO WARRANTY.
 *
 *     privrun [-u USER] [-g GROUP] [-U ENVVAR] [-G ENVVAR] [--verbose]
 *             COMMAND [ARG...]
 *
 * runs COMMAND with arguments ARG... under the named user and group
 * identities.  COMMAND must be the full path of an executable file;
 * no PATH search is performed, and ARG... is passed through verbatim.
 *
 * -u/--user and -g/--group name the target identities directly;
 * -U/--user-envvar and -G/--group-envvar instead name environment
 * variables from which to read them.  The direct form wins when both
 * are given for the same category.  With no identity options at all,
 * COMMAND is executed with the caller's own (root) identity unchanged;
 * that is deliberate, not an error.
 *
 * The group identity is always changed before the user identity,
 * because lowering the user identity first could cost the process the
 * authority to change its group.  Neither change is ever rolled back:
 * if a later step fails, the program exits immediately with whatever
 * identity it had reached.
 *
 * This program must be run as root.  It exits 1 when an identity
 * cannot be resolved or applied, or COMMAND cannot be executed, and 2
 * for command line problems.  On success it does not exit at all:
 * COMMAND replaces it in the same process, inheriting its pid, open
 * file descriptors, environment, and the just-set identities.
 */

use std::convert::Infallible;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use privrun::{
    apply_all, ensure_superuser, plan, resolve_group, resolve_user, IdentityRequest, Invocation,
    LaunchError, DEFAULT_MAX_ARGS,
};

const PROGNAME: &str = "privrun";

#[derive(Debug, Parser)]
#[command(
    name = "privrun",
    version,
    about = "Run COMMAND with arguments ARG... as an arbitrary user and group.",
    after_help = "COMMAND must be the full path of an executable file.  By default \
                  neither the user nor the group is changed, and COMMAND runs with \
                  the caller's own identity.  Only root may run this program."
)]
struct Cli {
    /// Run COMMAND as USER (takes precedence over --user-envvar)
    #[arg(short = 'u', long = "user", value_name = "USER")]
    user: Option<String>,

    /// Run COMMAND as GROUP (takes precedence over --group-envvar)
    #[arg(short = 'g', long = "group", value_name = "GROUP")]
    group: Option<String>,

    /// Read the user name from environment variable ENVVAR
    #[arg(short = 'U', long = "user-envvar", value_name = "ENVVAR")]
    user_envvar: Option<String>,

    /// Read the group name from environment variable ENVVAR
    #[arg(short = 'G', long = "group-envvar", value_name = "ENVVAR")]
    group_envvar: Option<String>,

    /// Print to stdout what is done
    #[arg(long)]
    verbose: bool,

    /// Full path of the command to execute, and its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // A version query is an ordinary informational exit; help
            // and every other parse problem count as usage.
            let code = match e.kind() {
                ErrorKind::DisplayVersion => 0,
                _ => 2,
            };
            let _ = e.print();
            process::exit(code);
        }
    }
}

fn run(cli: Cli) -> Result<Infallible, LaunchError> {
    if cli.command.is_empty() {
        return Err(LaunchError::Usage { detail: String::from("no command specified") });
    }

    ensure_superuser()?;

    // Resolve both categories completely before touching anything, so
    // a bad name can never leave a half-applied identity behind.
    let group_req = IdentityRequest { name: cli.group, from_env: cli.group_envvar };
    let user_req = IdentityRequest { name: cli.user, from_env: cli.user_envvar };
    let group = resolve_group(&group_req, cli.verbose)?;
    let user = resolve_user(&user_req, cli.verbose)?;

    apply_all(&plan(group, user), cli.verbose)?;

    let invocation = Invocation::new(&cli.command, DEFAULT_MAX_ARGS)?;
    invocation.exec(cli.verbose)
}

fn main() {
    let cli = parse_cli();
    let err = match run(cli) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    eprintln!("{}: {}", PROGNAME, err);
    if matches!(err, LaunchError::Usage { .. }) {
        eprintln!("Try '{} --help' for more information.", PROGNAME);
    }
    process::exit(err.exit_code());
}
