use std::{
    env,
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` with `XDG_CONFIG_HOME` pointing at `dir`, then restores it.
pub fn with_config_home<R>(dir: &Path, f: impl FnOnce() -> R) -> R {
    let _guard = env_lock();
    let old_xdg = env::var_os("XDG_CONFIG_HOME");

    // SAFETY: env is guarded by process-wide test mutex.
    unsafe { env::set_var("XDG_CONFIG_HOME", dir) };
    let result = f();

    match old_xdg {
        // SAFETY: restoring env while guard is held.
        Some(value) => unsafe { env::set_var("XDG_CONFIG_HOME", value) },
        // SAFETY: restoring env while guard is held.
        None => unsafe { env::remove_var("XDG_CONFIG_HOME") },
    }

    result
}
