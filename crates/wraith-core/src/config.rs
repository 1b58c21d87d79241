use std::cell::RefCell;

///
/// ProxyMode
///
/// Global strategy switch. Wrapper proxies carry explicit initializer and
/// cloner callbacks; ghost proxies initialize through the entity trait and
/// finalize clones inline in the initializer.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProxyMode {
    #[default]
    Wrapper,
    Ghost,
}

///
/// ProxyConfig
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyConfig {
    pub mode: ProxyMode,
}

thread_local! {
    static CONFIG: RefCell<ProxyConfig> = RefCell::new(ProxyConfig::default());
}

/// Read the active proxy configuration.
pub fn with_config<T>(f: impl FnOnce(&ProxyConfig) -> T) -> T {
    CONFIG.with(|cell| f(&cell.borrow()))
}

/// Replace the global proxy mode.
pub fn set_mode(mode: ProxyMode) {
    CONFIG.with(|cell| cell.borrow_mut().mode = mode);
}

/// Run a closure with a temporary mode override, restored on all exits
/// including unwind.
pub fn with_mode<T>(mode: ProxyMode, f: impl FnOnce() -> T) -> T {
    struct Guard(ProxyConfig);

    impl Drop for Guard {
        fn drop(&mut self) {
            CONFIG.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    let prev = CONFIG.with(|cell| {
        let mut slot = cell.borrow_mut();
        let prev = *slot;
        slot.mode = mode;
        prev
    });
    let _guard = Guard(prev);

    f()
}
