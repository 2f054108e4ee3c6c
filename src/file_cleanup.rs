//! Solver scratch directories that are removed after use and on Ctrl-C.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    process,
    sync::{Mutex, OnceLock},
};

/// Exit status used after an interrupt, as shells report SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

static LIVE_WORKDIRS: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();
static INTERRUPT_HOOK: OnceLock<()> = OnceLock::new();

fn live_workdirs() -> &'static Mutex<HashSet<PathBuf>> {
    LIVE_WORKDIRS.get_or_init(|| Mutex::new(HashSet::new()))
}

fn install_interrupt_hook() {
    INTERRUPT_HOOK.get_or_init(|| {
        let installed = ctrlc::set_handler(|| {
            let dirs: Vec<PathBuf> = live_workdirs()
                .lock()
                .map(|guard| guard.iter().cloned().collect())
                .unwrap_or_default();
            for dir in dirs {
                remove_workdir(&dir);
            }
            process::exit(INTERRUPTED_EXIT_CODE);
        });
        if let Err(err) = installed {
            log::warn!("cleanup: interrupt hook not installed err={err}");
        }
    });
}

/// A scratch directory that lives as long as the guard.
///
/// While alive the directory is removed if the process is interrupted. On
/// drop it is removed when `remove_on_drop` is set and otherwise left in
/// place for inspection.
#[derive(Debug)]
pub(crate) struct ScopedWorkDir {
    path: PathBuf,
    remove_on_drop: bool,
}

impl ScopedWorkDir {
    pub(crate) fn create(path: PathBuf, remove_on_drop: bool) -> io::Result<Self> {
        fs::create_dir_all(&path)?;
        install_interrupt_hook();
        if let Ok(mut guard) = live_workdirs().lock() {
            guard.insert(path.clone());
        }
        Ok(Self {
            path,
            remove_on_drop,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedWorkDir {
    fn drop(&mut self) {
        if self.remove_on_drop {
            remove_workdir(&self.path);
        } else {
            forget_workdir(&self.path);
            log::debug!("cleanup: kept workdir={}", self.path.display());
        }
    }
}

fn forget_workdir(path: &Path) {
    if let Some(set) = LIVE_WORKDIRS.get()
        && let Ok(mut guard) = set.lock()
    {
        guard.remove(path);
    }
}

fn remove_workdir(path: &Path) {
    match fs::remove_dir_all(path) {
        Ok(()) => log::debug!("cleanup: removed workdir={}", path.display()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            log::warn!(
                "cleanup: failed to remove workdir={} err={err}",
                path.display()
            );
            return;
        }
    }
    forget_workdir(path);
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{ScopedWorkDir, live_workdirs};

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("seriate-tests-{name}-{nanos}"))
    }

    fn is_registered(path: &PathBuf) -> bool {
        live_workdirs()
            .lock()
            .expect("registry lock")
            .contains(path)
    }

    #[test]
    fn guard_removes_directory_on_drop() {
        let dir = unique_temp_dir("scoped");
        let guard = ScopedWorkDir::create(dir.clone(), true).expect("create workdir");
        fs::write(guard.path().join("marker.txt"), b"ok").expect("write marker");
        assert!(is_registered(&dir));

        drop(guard);

        assert!(!dir.exists());
        assert!(!is_registered(&dir));
    }

    #[test]
    fn guard_keeps_directory_when_cleanup_is_off() {
        let dir = unique_temp_dir("kept");
        let guard = ScopedWorkDir::create(dir.clone(), false).expect("create workdir");
        drop(guard);

        assert!(dir.exists());
        assert!(!is_registered(&dir));
        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn already_removed_directory_is_ignored() {
        let dir = unique_temp_dir("gone");
        let guard = ScopedWorkDir::create(dir.clone(), true).expect("create workdir");
        fs::remove_dir_all(&dir).expect("remove early");
        drop(guard);
        assert!(!is_registered(&dir));
    }
}
