#[cfg(test)]
pub(crate) fn with_temp_home<F, R>(func: F) -> R
where
    F: FnOnce(&std::path::Path) -> R,
{
    static HOME_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
    let _guard = HOME_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().expect("tempdir");
    let old_home = std::env::var("HOME").ok();
    // SAFETY: HOME is only read by tests holding HOME_MUTEX.
    unsafe { std::env::set_var("HOME", dir.path()) };
    let result = func(dir.path());
    match old_home {
        // SAFETY: as above.
        Some(old) => unsafe { std::env::set_var("HOME", old) },
        None => unsafe { std::env::remove_var("HOME") },
    }
    result
}
