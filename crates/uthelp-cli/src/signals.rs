//! SIGINT, SIGTERM and SIGHUP sent from outside the terminal. Raw mode
//! turns Ctrl+C into a key press, so these only arrive via `kill` or a
//! closing terminal; the input loop polls the flag and unwinds normally.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

static TERMINATION_REQUESTED: AtomicBool = AtomicBool::new(false);

pub fn termination_requested() -> bool {
    TERMINATION_REQUESTED.load(Ordering::SeqCst)
}

/// Only stores to an atomic, which is async-signal-safe.
#[cfg(unix)]
extern "C" fn handle_termination(_: libc::c_int) {
    TERMINATION_REQUESTED.store(true, Ordering::SeqCst);
}

#[cfg(unix)]
pub fn install_termination_handlers() -> io::Result<()> {
    for signal in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        unsafe {
            // SAFETY: handle_termination has no side effects beyond flipping
            // an atomic flag.
            let handler = handle_termination as *const () as libc::sighandler_t;
            if libc::signal(signal, handler) == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn install_termination_handlers() -> io::Result<()> {
    Ok(())
}
