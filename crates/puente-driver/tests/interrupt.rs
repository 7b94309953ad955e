use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use puente_driver::{Interruptible, SignalHandler};

#[derive(Default)]
struct CancelFlag {
    cancelled: AtomicBool,
}

impl Interruptible for CancelFlag {
    fn interrupt(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

// Kept as the only test in this binary: it delivers a real SIGINT to the
// process, and a second delivery would terminate it.
#[test]
fn first_interrupt_requests_cooperative_stop() {
    let flag = Arc::new(CancelFlag::default());
    let _handler = SignalHandler::new("tester", Arc::clone(&flag) as Arc<dyn Interruptible>);
    assert!(!SignalHandler::stop_requested());
    assert!(!flag.cancelled.load(Ordering::SeqCst));

    unsafe {
        libc::raise(libc::SIGINT);
    }

    assert!(SignalHandler::stop_requested());
    assert!(flag.cancelled.load(Ordering::SeqCst));
}
