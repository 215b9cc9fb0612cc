//! Terminal state around the hidden password prompt
//!
//! The password prompt turns echo off on the controlling terminal and only
//! turns it back on when it returns. The Ctrl+C handler ends the process
//! without returning there, so the prompt records the terminal state first
//! and the handler puts it back through [`restore`].

#[cfg(unix)]
use std::sync::Mutex;

#[cfg(unix)]
static SAVED_STATE: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Keeps the terminal state recorded while it is alive
#[derive(Debug)]
pub struct EchoGuard {
    _private: (),
}

impl EchoGuard {
    pub fn save() -> Self {
        #[cfg(unix)]
        {
            if let (Some(state), Ok(mut saved)) = (unix::current_state(), SAVED_STATE.lock()) {
                *saved = Some(state);
            }
        }
        EchoGuard { _private: () }
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if let Ok(mut saved) = SAVED_STATE.lock() {
                *saved = None;
            }
        }
    }
}

/// Put back the state recorded by a live [`EchoGuard`]. No-op otherwise.
pub fn restore() {
    #[cfg(unix)]
    {
        let saved = SAVED_STATE.lock().map(|saved| *saved).unwrap_or(None);
        if let Some(state) = saved {
            unix::apply_state(&state);
        }
    }
}

#[cfg(unix)]
mod unix {
    use std::fs::File;
    use std::os::unix::io::AsRawFd;

    /// The prompt reads from the controlling terminal, not stdin
    const TTY_PATH: &str = "/dev/tty";

    pub fn current_state() -> Option<libc::termios> {
        let tty = File::open(TTY_PATH).ok()?;
        let mut term: libc::termios = unsafe { std::mem::zeroed() };
        let res = unsafe { libc::tcgetattr(tty.as_raw_fd(), &mut term as *mut libc::termios) };
        (res == 0).then_some(term)
    }

    pub fn apply_state(state: &libc::termios) {
        if let Ok(tty) = File::open(TTY_PATH) {
            let res = unsafe { libc::tcsetattr(tty.as_raw_fd(), libc::TCSANOW, state as *const libc::termios) };
            if res != 0 {
                tracing::debug!(error = %std::io::Error::last_os_error(), "Could not restore terminal state");
            }
        }
    }
}
