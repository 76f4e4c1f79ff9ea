//! SIGINT handling.
//!
//! An interrupt at any point restores the terminal, prints `Quitting` and
//! exits with status 1. The handler only makes async-signal-safe calls.
//! While a [`defer`] guard is alive the signal is held back, so the process
//! never exits halfway through writing the database.

#[cfg(unix)]
mod imp {
    use std::mem::MaybeUninit;
    use std::sync::OnceLock;

    /// Terminal mode from before the password prompt changed it.
    static TERMINAL_MODE: OnceLock<libc::termios> = OnceLock::new();

    const NOTICE: &[u8] = b"\nQuitting\n";

    extern "C" fn on_interrupt(_signal: libc::c_int) {
        unsafe {
            if let Some(mode) = TERMINAL_MODE.get() {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, mode);
            }
            libc::write(libc::STDERR_FILENO, NOTICE.as_ptr().cast(), NOTICE.len());
            libc::_exit(1);
        }
    }

    pub fn install() {
        let handler = on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        if unsafe { libc::signal(libc::SIGINT, handler) } == libc::SIG_ERR {
            tracing::warn!(
                "Failed to install interrupt handler: {}",
                std::io::Error::last_os_error()
            );
        }
    }

    /// SIGINT stays pending until this is dropped.
    pub struct Deferred {
        previous: libc::sigset_t,
    }

    pub fn defer() -> Deferred {
        let mut block = MaybeUninit::<libc::sigset_t>::uninit();
        let mut previous = MaybeUninit::<libc::sigset_t>::uninit();
        unsafe {
            libc::sigemptyset(block.as_mut_ptr());
            libc::sigaddset(block.as_mut_ptr(), libc::SIGINT);
            libc::sigemptyset(previous.as_mut_ptr());
            if libc::pthread_sigmask(libc::SIG_BLOCK, block.as_ptr(), previous.as_mut_ptr()) != 0 {
                tracing::warn!("Failed to defer interrupts");
            }
            Deferred {
                previous: previous.assume_init(),
            }
        }
    }

    impl Drop for Deferred {
        fn drop(&mut self) {
            unsafe {
                libc::pthread_sigmask(libc::SIG_SETMASK, &self.previous, std::ptr::null_mut());
            }
        }
    }

    pub fn save_terminal_mode() {
        let mut mode = MaybeUninit::<libc::termios>::uninit();
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, mode.as_mut_ptr()) } == 0 {
            let _ = TERMINAL_MODE.set(unsafe { mode.assume_init() });
        }
    }
}

// Ctrl-C at the prompt is read as a key event; elsewhere the default
// handler ends the process.
#[cfg(not(unix))]
mod imp {
    pub struct Deferred;

    pub fn defer() -> Deferred {
        Deferred
    }

    pub fn install() {}

    pub fn save_terminal_mode() {}
}

pub use imp::{defer, install, save_terminal_mode};
