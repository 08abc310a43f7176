//! Opening generated files in the default browser.

use std::path::Path;
use std::process::Command;

/// Launch the platform's default handler for `path`.
///
/// Returns once the handler process has been spawned.
pub(crate) fn open_path(path: &Path) -> std::io::Result<()> {
    let mut command = launcher();
    command.arg(path);
    command.spawn()?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn launcher() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(target_os = "macos")]
fn launcher() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher() -> Command {
    Command::new("xdg-open")
}
