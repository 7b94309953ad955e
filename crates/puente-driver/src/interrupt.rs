//! Interrupt-signal bridging.
//!
//! OS signal delivery can't carry a context pointer, so the handler state
//! is a process-scoped singleton: a pre-rendered message and an
//! [`Interruptible`] reference stored write-once at installation, plus one
//! atomic stop flag shared between the handler and the main path. The
//! handler itself touches only async-signal-safe primitives: `write`,
//! `_exit`, `signal`, and atomic loads and stores.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// A cooperating cancellation target.
///
/// `interrupt` runs inside the signal handler, so implementations must
/// restrict themselves to atomic flag updates; the running solve observes
/// the cancellation at its next polling point.
pub trait Interruptible: Send + Sync {
    fn interrupt(&self);
}

struct HandlerState {
    message: Vec<u8>,
    interruptible: Arc<dyn Interruptible>,
}

static STATE: OnceLock<HandlerState> = OnceLock::new();

// True before installation so a signal delivered with no handler state
// terminates immediately instead of touching uninitialized plumbing.
static STOP: AtomicBool = AtomicBool::new(true);

extern "C" fn handle_interrupt(sig: libc::c_int) {
    if let Some(state) = STATE.get() {
        let mut written = 0;
        while written < state.message.len() {
            // write is async-signal-safe; formatted printing is not.
            let result = unsafe {
                libc::write(
                    1,
                    state.message[written..].as_ptr() as *const libc::c_void,
                    state.message.len() - written,
                )
            };
            if result < 0 {
                break;
            }
            written += result as usize;
        }
    }
    if STOP.swap(true, Ordering::SeqCst) {
        // Second interrupt: the process is unresponsive to cooperative
        // cancellation. _exit is async-signal-safe; exit is not.
        unsafe { libc::_exit(1) }
    }
    if let Some(state) = STATE.get() {
        state.interruptible.interrupt();
    }
    // Some platforms reset the disposition before the handler runs.
    unsafe {
        libc::signal(sig, handle_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t);
    }
}

/// Installs the interrupt-signal handler for one solver process.
///
/// The first interrupt writes a `<BREAK>` message, requests cooperative
/// cancellation through the interruptible, and arms a second interrupt to
/// terminate the process immediately. State installs once per process;
/// constructing a second handler re-arms the signal but keeps the first
/// message and interruptible.
pub struct SignalHandler {
    _private: (),
}

impl SignalHandler {
    /// Render the interrupt message for `solver_name`, store the handler
    /// state, and install the `SIGINT` handler.
    pub fn new(solver_name: &str, interruptible: Arc<dyn Interruptible>) -> Self {
        let state = HandlerState {
            message: format!("\n<BREAK> ({solver_name})\n").into_bytes(),
            interruptible,
        };
        if STATE.set(state).is_err() {
            tracing::warn!(
                component = "interrupt",
                operation = "install",
                status = "skipped",
                solver = solver_name,
                "Signal handler state already installed"
            );
        }
        STOP.store(false, Ordering::SeqCst);
        unsafe {
            libc::signal(
                libc::SIGINT,
                handle_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t,
            );
        }
        tracing::debug!(
            component = "interrupt",
            operation = "install",
            status = "success",
            solver = solver_name,
            "Installed interrupt handler"
        );
        SignalHandler { _private: () }
    }

    /// Whether an interrupt has been received.
    ///
    /// The main path polls this cooperatively; there is no preemption.
    pub fn stop_requested() -> bool {
        STOP.load(Ordering::SeqCst)
    }
}
