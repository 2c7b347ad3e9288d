use super::*;
use crate::clock::source::SteppedClock;
use crate::clock::viewport::viewport_channel;
use crate::encode::sink::InMemorySink;
use crate::foundation::error::SceneError;
use crate::render::backend::RenderSettings;
use crate::render::cpu::CpuBackend;
use crate::scene::display::DisplayList;
use std::time::Duration;

/// Records the elapsed time of every display list instead of rasterizing.
#[derive(Default)]
struct ListRecorder {
    seen: Vec<(f64, f64)>,
}

impl RenderBackend for ListRecorder {
    fn render_display_list(&mut self, list: &DisplayList) -> SceneResult<FrameRGBA> {
        self.seen.push((list.elapsed, list.viewport.width));
        Ok(FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 255],
            premultiplied: true,
        })
    }
}

struct Broken;

impl RenderBackend for Broken {
    fn render_display_list(&mut self, _list: &DisplayList) -> SceneResult<FrameRGBA> {
        Err(SceneError::surface_unavailable("no context"))
    }
}

#[test]
fn skips_until_a_viewport_is_observed() {
    let (writer, reader) = viewport_channel();
    let mut lp = FrameLoop::new(ListRecorder::default(), InMemorySink::new(), reader);
    assert_eq!(
        lp.tick(Timestamp::from_millis(500)),
        TickOutcome::Skipped { elapsed: 0.0 }
    );
    assert_eq!(lp.baseline(), Some(Timestamp::from_millis(500)));
    writer.observe(Some(320.0), None).unwrap();
    assert_eq!(
        lp.tick(Timestamp::from_millis(1500)),
        TickOutcome::Rendered {
            index: 0,
            elapsed: 1.0
        }
    );
    assert_eq!(
        lp.stats(),
        LoopStats {
            rendered: 1,
            skipped: 1,
            failed: 0
        }
    );
    assert!(lp.sink().config().is_some());
}

#[test]
fn resize_keeps_the_baseline() {
    let (writer, reader) = viewport_channel();
    writer.observe(Some(960.0), None).unwrap();
    let mut lp = FrameLoop::new(ListRecorder::default(), InMemorySink::new(), reader);
    lp.tick(Timestamp::from_millis(100));
    lp.tick(Timestamp::from_millis(600));
    writer.observe(Some(480.0), Some(2.0)).unwrap();
    lp.tick(Timestamp::from_millis(1100));
    let seen = &lp.backend().seen;
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1], (0.5, 960.0));
    assert_eq!(seen[2], (1.0, 480.0));
}

#[test]
fn elapsed_never_decreases() {
    let (writer, reader) = viewport_channel();
    writer.observe(Some(200.0), None).unwrap();
    let mut lp = FrameLoop::new(ListRecorder::default(), InMemorySink::new(), reader);
    lp.tick(Timestamp::from_millis(1000));
    lp.tick(Timestamp::from_millis(2000));
    lp.tick(Timestamp::from_millis(1500));
    let elapsed: Vec<f64> = lp.backend().seen.iter().map(|(e, _)| *e).collect();
    assert_eq!(elapsed, vec![0.0, 1.0, 1.0]);
}

#[test]
fn render_failures_are_logged_not_raised() {
    let (writer, reader) = viewport_channel();
    writer.observe(Some(200.0), None).unwrap();
    let mut lp = FrameLoop::new(Broken, InMemorySink::new(), reader);
    assert!(matches!(lp.tick(Timestamp::ZERO), TickOutcome::Failed { .. }));
    assert_eq!(lp.stats().failed, 1);
    assert!(lp.sink().frames().is_empty());
    lp.close().unwrap();
    assert!(!lp.sink().is_ended());
}

#[test]
fn attached_loop_stops_after_teardown() {
    let (writer, reader) = viewport_channel();
    writer.observe(Some(64.0), None).unwrap();
    let mut clock = SteppedClock::new(Duration::from_millis(40));
    let handle = FrameLoop::new(
        CpuBackend::new(RenderSettings::default()),
        InMemorySink::new(),
        reader,
    )
    .attach(&mut clock);

    clock.fire();
    clock.advance();
    clock.advance();
    assert!(handle.is_running());
    let stats = handle.teardown().unwrap();
    assert_eq!(stats.rendered, 3);
    assert!(!handle.is_running());

    assert_eq!(clock.advance(), 0);
    assert_eq!(handle.stats().rendered, 3);
    handle.with_loop(|lp| {
        assert!(lp.is_closed());
        assert!(lp.sink().is_ended());
        let stamps: Vec<u64> = lp.sink().frames().iter().map(|(s, _)| s.index).collect();
        assert_eq!(stamps, vec![0, 1, 2]);
        assert!((lp.sink().frames()[2].0.elapsed - 0.08).abs() < 1e-9);
    });
    assert!(handle.teardown().is_ok());
}
