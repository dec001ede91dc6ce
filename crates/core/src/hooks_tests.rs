use super::*;
use std::sync::atomic::{AtomicBool, Ordering};

struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

struct FlagCancel(AtomicBool);

impl Cancellation for FlagCancel {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[test]
fn cancellation_trait_is_object_safe_and_usable() {
    let never = NeverCancel;
    assert!(!never.is_cancelled());

    let flag = FlagCancel(AtomicBool::new(true));
    assert!(flag.is_cancelled());

    let boxed: Box<dyn Cancellation> = Box::new(NeverCancel);
    assert!(!boxed.is_cancelled());
}
