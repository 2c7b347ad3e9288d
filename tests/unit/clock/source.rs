use super::*;
use std::sync::Mutex;

fn recorder() -> (Arc<Mutex<Vec<Timestamp>>>, FrameCallback) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let cb: FrameCallback = Box::new(move |t| sink.lock().unwrap().push(t));
    (seen, cb)
}

#[test]
fn stepped_clock_ticks_with_non_decreasing_time() {
    let mut clock = SteppedClock::new(Duration::from_millis(100));
    let (seen, cb) = recorder();
    clock.schedule(cb);
    assert_eq!(clock.fire(), 1);
    clock.advance();
    clock.advance_by(Duration::from_millis(50));
    clock.set(Timestamp::from_millis(10));
    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            Timestamp::ZERO,
            Timestamp::from_millis(100),
            Timestamp::from_millis(150),
            Timestamp::from_millis(150),
        ]
    );
}

#[test]
fn cancelled_callbacks_stop_running() {
    let mut clock = SteppedClock::new(Duration::from_millis(16));
    let (seen_a, a) = recorder();
    let (seen_b, b) = recorder();
    let token_a = clock.schedule(a);
    let _token_b = clock.schedule(b);
    assert_eq!(clock.advance(), 2);
    token_a.cancel();
    assert!(token_a.is_cancelled());
    assert_eq!(clock.pending(), 1);
    assert_eq!(clock.advance(), 1);
    assert_eq!(seen_a.lock().unwrap().len(), 1);
    assert_eq!(seen_b.lock().unwrap().len(), 2);
}

#[test]
fn callback_can_cancel_a_later_one_mid_tick() {
    let mut clock = SteppedClock::new(Duration::from_millis(16));
    let victim = Arc::new(Mutex::new(None::<CancellationToken>));
    let slot = Arc::clone(&victim);
    clock.schedule(Box::new(move |_| {
        if let Some(t) = slot.lock().unwrap().as_ref() {
            t.cancel();
        }
    }));
    let (seen, cb) = recorder();
    *victim.lock().unwrap() = Some(clock.schedule(cb));
    assert_eq!(clock.fire(), 1);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn fps_must_be_positive() {
    assert!(SteppedClock::from_fps(0.0).is_err());
    assert!(IntervalClock::from_fps(f64::NAN).is_err());
    let clock = SteppedClock::from_fps(50.0).unwrap();
    assert_eq!(clock.interval(), Duration::from_millis(20));
}

#[test]
fn interval_clock_runs_until_cancelled() {
    let mut clock = IntervalClock::new(Duration::from_millis(1));
    let count = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&count);
    let token = Arc::new(Mutex::new(None::<CancellationToken>));
    let own = Arc::clone(&token);
    let t = clock.schedule(Box::new(move |_| {
        let mut n = counter.lock().unwrap();
        *n += 1;
        if *n == 3 {
            if let Some(t) = own.lock().unwrap().as_ref() {
                t.cancel();
            }
        }
    }));
    *token.lock().unwrap() = Some(t);
    let ticks = clock.run_for(Duration::from_secs(5));
    assert_eq!(ticks, 3);
    assert_eq!(*count.lock().unwrap(), 3);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn interval_clock_now_moves_forward() {
    let clock = IntervalClock::new(Duration::from_millis(1));
    let a = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    assert!(clock.now() > a);
}
