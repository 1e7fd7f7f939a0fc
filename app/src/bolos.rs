#[cfg(feature = "ledger")]
extern "C" {
    fn check_app_canary();
    fn zemu_log_stack(ctx: *const u8);
    fn zemu_log(buf: *const u8);
    fn zemu_log_num(buf: *const u8, num: u32);
}

/// Expected value of the session canary word. Anything else means the
/// session memory was overwritten.
pub const APP_CANARY_MAGIC: u32 = 0xDEAD_0031;

/// Platform stack canary. On device this resets the app when the canary
/// was smashed, so it only returns on success.
pub fn app_canary() {
    #[cfg(feature = "ledger")]
    unsafe {
        check_app_canary()
    }
}

#[cfg(test)]
std::thread_local! {
    static PLATFORM_CANARY_SMASHED: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
    static STACK_LOG: core::cell::RefCell<std::vec::Vec<std::string::String>> =
        const { core::cell::RefCell::new(std::vec::Vec::new()) };
}

#[cfg(not(test))]
fn platform_canary_intact() -> bool {
    app_canary();
    true
}

// Host stand-in for the platform canary, which resets the device instead of returning
#[cfg(test)]
fn platform_canary_intact() -> bool {
    !PLATFORM_CANARY_SMASHED.with(|smashed| smashed.get())
}

#[cfg(test)]
pub(crate) fn smash_platform_canary() {
    PLATFORM_CANARY_SMASHED.with(|smashed| smashed.set(true));
}

/// Sentinel word owned by a signing session.
///
/// It sits next to the parser state inside the session so that an
/// overflowing write into the session shows up as a changed word.
#[derive(Clone, Copy)]
pub struct Canary {
    word: u32,
}

impl Default for Canary {
    fn default() -> Self {
        Canary {
            word: APP_CANARY_MAGIC,
        }
    }
}

impl Canary {
    pub fn new() -> Self {
        Canary::default()
    }

    pub fn rearm(&mut self) {
        self.word = APP_CANARY_MAGIC;
        #[cfg(test)]
        PLATFORM_CANARY_SMASHED.with(|smashed| smashed.set(false));
    }

    /// Checks both the platform canary and the session word.
    pub fn is_intact(&self) -> bool {
        platform_canary_intact() && self.word == APP_CANARY_MAGIC
    }

    #[cfg(test)]
    pub(crate) fn smash(&mut self) {
        self.word = 0;
    }
}

pub fn zlog(_buf: &str) {
    #[cfg(feature = "ledger")]
    unsafe {
        zemu_log(_buf.as_bytes().as_ptr())
    }
}

pub fn zlog_stack(_buf: &str) {
    #[cfg(feature = "ledger")]
    unsafe {
        zemu_log_stack(_buf.as_bytes().as_ptr())
    }
    #[cfg(test)]
    STACK_LOG.with(|log| log.borrow_mut().push(_buf.trim_end_matches('\0').into()));
}

/// Drains the messages `zlog_stack` recorded on this thread.
#[cfg(test)]
pub(crate) fn take_stack_log() -> std::vec::Vec<std::string::String> {
    STACK_LOG.with(|log| log.take())
}

pub fn zlog_num(_buf: &str, _num: u32) {
    #[cfg(feature = "ledger")]
    unsafe {
        zemu_log_num(_buf.as_bytes().as_ptr(), _num)
    }
}
