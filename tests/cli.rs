//! Exit-code contract of the privrun binary, exercised end to end.
//! Verbose output is never used as a success signal here; only exit
//! status and the replaced image's own behavior are.

use std::process::Command;

use nix::unistd::Uid;

fn privrun() -> Command {
    Command::new(env!("CARGO_BIN_EXE_privrun"))
}

#[test]
fn no_command_is_a_usage_error() {
    let out = privrun().output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let msg = String::from_utf8_lossy(&out.stderr);
    assert!(msg.contains("no command specified"), "stderr: {}", msg);
}

#[test]
fn version_query_exits_zero_before_doing_anything() {
    let out = privrun().arg("--version").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("privrun"), "stdout: {}", text);
}

#[test]
fn help_counts_as_a_usage_query() {
    let out = privrun().arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unrecognized_option_is_a_usage_error() {
    let out = privrun().args(["--frobnicate", "/bin/true"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

// Exit 1 regardless of privilege: unprivileged callers fail the root
// check, root callers fail the lookup.  Either way no transition
// happens and the command never runs.
#[test]
fn unknown_user_fails_without_running_the_command() {
    let out = privrun()
        .args(["-u", "privrun-no-such-user", "/bin/echo", "ran-anyway"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(!text.contains("ran-anyway"), "stdout: {}", text);
}

#[test]
fn missing_envvar_fails_before_exec() {
    let mut cmd = privrun();
    cmd.env_remove("PRIVRUN_TEST_NO_SUCH_VAR");
    let out = cmd
        .args(["-U", "PRIVRUN_TEST_NO_SUCH_VAR", "/bin/echo", "ran-anyway"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(!text.contains("ran-anyway"), "stdout: {}", text);
}

#[test]
fn nonroot_callers_are_rejected() {
    if Uid::current().is_root() {
        return;
    }
    let out = privrun().arg("/bin/true").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let msg = String::from_utf8_lossy(&out.stderr);
    assert!(msg.contains("root"), "stderr: {}", msg);
}

#[test]
fn exec_failure_exits_one() {
    // Non-root exits 1 at the root check instead; same observable code.
    let out = privrun().arg("/privrun-no-such-dir/prog").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

// The remaining paths need real root.

#[test]
fn passthrough_runs_the_command_unchanged() {
    if !Uid::current().is_root() {
        return;
    }
    let out = privrun().args(["/bin/echo", "hello"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
}

#[test]
fn replacement_image_owns_the_exit_status() {
    if !Uid::current().is_root() {
        return;
    }
    let out = privrun().arg("/bin/false").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn identity_options_change_the_resulting_process_identity() {
    if !Uid::current().is_root() {
        return;
    }
    // root resolving itself: harmless, but exercises the full
    // resolve -> transition -> exec sequence.
    let out = privrun().args(["-u", "root", "-g", "root", "/usr/bin/id", "-u"]).output().unwrap();
    if !out.status.success() {
        // /usr/bin/id may be absent in minimal images
        return;
    }
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "0");
}
