//! Ringfall launcher
//!
//! Spawns the simulation window and the info window as sibling processes,
//! then watches them: when either exits (window closed or Escape), the
//! other is torn down too.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::thread::sleep;
use std::time::Duration;

/// Path to a binary installed next to this one
fn sibling(name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let path = exe
        .parent()?
        .join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
    path.is_file().then_some(path)
}

fn spawn(path: &Path) -> Option<Child> {
    match Command::new(path).spawn() {
        Ok(child) => Some(child),
        Err(err) => {
            log::error!("Failed to launch {}: {err}", path.display());
            None
        }
    }
}

fn main() {
    env_logger::init();

    let Some(main_bin) = sibling("ringfall") else {
        log::error!("ringfall binary not found next to the launcher");
        std::process::exit(1);
    };
    let Some(info_bin) = sibling("ringfall-info") else {
        log::error!("ringfall-info binary not found next to the launcher");
        std::process::exit(1);
    };

    log::info!("Launching main window");
    let Some(main_child) = spawn(&main_bin) else {
        std::process::exit(1);
    };

    // Give the main window a moment to come up before the info window
    sleep(Duration::from_millis(500));

    log::info!("Launching info window");
    let Some(info_child) = spawn(&info_bin) else {
        let mut main_child = main_child;
        main_child.kill().ok();
        main_child.wait().ok();
        std::process::exit(1);
    };

    let mut children = [main_child, info_child];
    log::info!("Both windows running; closing either stops both");

    // Liveness poll; first exit tears the sibling down
    'watch: loop {
        sleep(Duration::from_millis(100));
        for child in &mut children {
            if let Ok(Some(code)) = child.try_wait() {
                log::info!("A window exited ({code}); stopping the other");
                break 'watch;
            }
        }
    }

    for child in &mut children {
        child.kill().ok();
        child.wait().ok();
    }
    log::info!("All windows closed");
}
