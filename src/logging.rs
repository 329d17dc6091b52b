use log::{Level, LevelFilter};

/// Installs the browser console logger. The logger itself accepts every
/// level; `max_level` does the filtering so [`set_level`] can widen it later.
pub fn init(level: LevelFilter) {
    if let Err(err) = console_log::init_with_level(Level::Trace) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    set_level(level);
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
