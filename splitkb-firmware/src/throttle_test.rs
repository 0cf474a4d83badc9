use core::cell::Cell;

use super::*;

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

#[test]
fn first_poll_always_sends() {
    let mut det = ChangeDetector::<2>::new();
    assert!(det.needs_sync(at(0), &[0, 0]));
    assert_eq!(det.poll(at(0), &[0, 0], |_| true), SyncOutcome::Sent);
    assert_eq!(det.last_send(), Some(at(0)));
}

#[test]
fn change_sends_immediately() {
    let mut det = ChangeDetector::<1>::new();
    assert_eq!(det.poll(at(1000), &[1], |_| true), SyncOutcome::Sent);
    assert_eq!(det.poll(at(1001), &[1], |_| true), SyncOutcome::Idle);
    assert_eq!(det.poll(at(1002), &[2], |d| d == [2]), SyncOutcome::Sent);
    assert_eq!(det.cached(), &[2]);
}

#[test]
fn unchanged_value_resent_after_ceiling() {
    let mut det = ChangeDetector::<1>::new();
    det.poll(at(1000), &[5], |_| true);
    assert_eq!(det.poll(at(1100), &[5], |_| true), SyncOutcome::Idle);
    assert_eq!(det.poll(at(1101), &[5], |_| true), SyncOutcome::Sent);
    assert_eq!(det.last_send(), Some(at(1101)));
}

#[test]
fn send_count_over_unchanged_window() {
    let mut det = ChangeDetector::<1>::new();
    let sends = Cell::new(0);
    for ms in 0..1000 {
        det.poll(at(5000 + ms), &[9], |_| {
            sends.set(sends.get() + 1);
            true
        });
    }
    // at most once per window and never staler than one window
    assert!(
        (9..=10).contains(&sends.get()),
        "unexpected send count {}",
        sends.get()
    );
}

#[test]
fn failed_send_still_caches() {
    let mut det = ChangeDetector::<1>::new();
    assert_eq!(det.poll(at(1000), &[1], |_| true), SyncOutcome::Sent);

    assert_eq!(det.poll(at(1010), &[2], |_| false), SyncOutcome::Failed);
    assert_eq!(det.cached(), &[2]);
    assert_eq!(det.last_send(), Some(at(1000)));

    // no retry until the ceiling measured from the last good send
    assert_eq!(det.poll(at(1050), &[2], |_| true), SyncOutcome::Idle);
    assert_eq!(det.poll(at(1101), &[2], |_| true), SyncOutcome::Sent);
}

#[test]
fn failed_send_after_stale_period_retries_next_poll() {
    let mut det = ChangeDetector::<1>::new();
    assert_eq!(det.poll(at(0), &[1], |_| false), SyncOutcome::Failed);
    assert!(det.needs_sync(at(1), &[1]));
    assert_eq!(det.poll(at(1), &[1], |_| true), SyncOutcome::Sent);
}
