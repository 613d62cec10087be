//! The interactive acquisition workflow: wait for a controller, let the
//! user pick one with a trigger pull, then record one floor point per
//! trigger pull until the menu button finishes the session.
//!
//! Every wait in here polls on the shared [`Ticker`](crate::clock::Ticker)
//! cadence and none of them time out: an absent controller or an
//! un-pulled trigger simply keeps its phase waiting until the user acts.

use crate::clock::Ticker;
use crate::debounce::EdgeDetector;
use crate::system::{self, TrackingSystem};
use crate::types::{BoundaryPoint, Button, DeviceIndex, PoseQuality, Sample};
use crate::{bounds, ChaperoneError, Result};

/// The ordered corner points recorded with one controller.
///
/// Created when controller selection completes, mutated only by the
/// collector, and consumed exactly once via [`Self::into_points`] when the
/// session finishes.
#[derive(Debug)]
pub struct CalibrationSession {
    controller: DeviceIndex,
    points: Vec<BoundaryPoint>,
}

impl CalibrationSession {
    pub fn new(controller: DeviceIndex) -> Self {
        CalibrationSession {
            controller,
            points: Vec::new(),
        }
    }

    /// The controller this session was recorded with.
    pub fn controller(&self) -> DeviceIndex {
        self.controller
    }

    /// Recorded points in insertion order.
    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn record(&mut self, point: BoundaryPoint) {
        self.points.push(point);
    }

    fn reset(&mut self) {
        self.points.clear();
    }

    /// Consume the session, enforcing the minimum polygon size.
    pub fn into_points(self) -> Result<Vec<BoundaryPoint>> {
        if self.points.len() < bounds::MIN_BOUNDARY_POINTS {
            return Err(ChaperoneError::InsufficientPoints(self.points.len()));
        }
        Ok(self.points)
    }
}

/// Whether the collector wants more ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Collecting,
    Finished,
}

/// Per-tick core of the collection phase.
///
/// Fed one combined button+pose [`Sample`] per tick; owns the
/// [`CalibrationSession`] it fills. After an accepted capture it waits out
/// the physical trigger hold on raw state, so one press never records two
/// points no matter how many ticks it spans.
#[derive(Debug)]
pub struct Collector {
    session: CalibrationSession,
    edges: EdgeDetector,
    awaiting_release: bool,
}

impl Collector {
    pub fn new(controller: DeviceIndex) -> Self {
        Collector {
            session: CalibrationSession::new(controller),
            edges: EdgeDetector::new(),
            awaiting_release: false,
        }
    }

    pub fn session(&self) -> &CalibrationSession {
        &self.session
    }

    pub fn into_session(self) -> CalibrationSession {
        self.session
    }

    /// Advance one tick. Menu wins over a same-tick trigger edge; grip
    /// clears everything recorded so far and keeps collecting.
    pub fn step(&mut self, sample: Sample) -> Progress {
        if self.awaiting_release {
            if sample.buttons.contains(Button::Trigger.mask()) {
                return Progress::Collecting;
            }
            // Trigger released; the edge detector last saw the capture
            // sample, so a button pressed during the hold registers now.
            self.awaiting_release = false;
        }

        let edges = self.edges.press_edges(sample.buttons);

        if edges.contains(Button::Menu.mask()) {
            log::info!(
                "Menu pressed, finishing with {} point(s)",
                self.session.len()
            );
            return Progress::Finished;
        }

        if edges.contains(Button::Grip.mask()) {
            log::info!(
                "Grip pressed, discarding {} recorded point(s)",
                self.session.len()
            );
            self.session.reset();
        }

        if edges.contains(Button::Trigger.mask()) {
            match sample.pose_quality() {
                PoseQuality::Invalid => {
                    log::warn!("Trigger pressed but the pose is not valid, try again");
                }
                PoseQuality::Degraded => {
                    log::warn!("Trigger pressed but tracking is not running cleanly, try again");
                }
                PoseQuality::Valid => {
                    let [x, y, z] = sample.position;
                    log::info!("Point {}: {:.3}, {:.3}, {:.3}", self.session.len(), x, y, z);
                    self.session.record(BoundaryPoint::from_position(sample.position));
                    self.awaiting_release = true;
                }
            }
        }

        Progress::Collecting
    }
}

/// Repeat the device scan on the polling tick until a controller shows up.
///
/// Retry-forever: the user may take arbitrarily long to power one on.
pub fn wait_for_controllers<S, T>(system: &S, ticker: &mut T) -> Vec<DeviceIndex>
where
    S: TrackingSystem,
    T: Ticker,
{
    loop {
        if let Some(found) = system::first_connected_controller(system) {
            log::info!("Found controller {}", found);
            return vec![found];
        }
        ticker.tick();
    }
}

/// Poll every connected candidate until one produces a trigger press edge;
/// that controller becomes the active device for the rest of the run.
pub fn select_controller<S, T>(
    system: &S,
    ticker: &mut T,
    candidates: &[DeviceIndex],
) -> DeviceIndex
where
    S: TrackingSystem,
    T: Ticker,
{
    let mut edges: Vec<EdgeDetector> = candidates.iter().map(|_| EdgeDetector::new()).collect();
    loop {
        for (detector, &candidate) in edges.iter_mut().zip(candidates) {
            if !system.is_connected(candidate) {
                continue;
            }
            let sample = system.sample(candidate);
            if detector
                .press_edges(sample.buttons)
                .contains(Button::Trigger.mask())
            {
                log::info!("Selected controller {}", candidate);
                return candidate;
            }
        }
        ticker.tick();
    }
}

/// Wait until the trigger on the active device reads released, so a press
/// that is still physically held carries no further effect.
pub fn await_trigger_release<S, T>(system: &S, ticker: &mut T, device: DeviceIndex)
where
    S: TrackingSystem,
    T: Ticker,
{
    loop {
        if !system.sample(device).buttons.contains(Button::Trigger.mask()) {
            return;
        }
        ticker.tick();
    }
}

/// Drive a [`Collector`] with one combined sample per tick until the user
/// finishes the session with the menu button.
pub fn collect<S, T>(system: &S, ticker: &mut T, controller: DeviceIndex) -> CalibrationSession
where
    S: TrackingSystem,
    T: Ticker,
{
    let mut collector = Collector::new(controller);
    loop {
        let sample = system.sample(controller);
        if collector.step(sample) == Progress::Finished {
            return collector.into_session();
        }
        ticker.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTicker;
    use crate::system::ScriptedSystem;
    use crate::types::{Buttons, DeviceClass, OriginMode};

    const CONTROLLER: DeviceIndex = DeviceIndex(0);

    fn pressed(buttons: Buttons) -> Sample {
        Sample {
            buttons,
            pose_valid: true,
            tracking_ok: true,
            position: [0.0; 3],
        }
    }

    fn pressed_at(buttons: Buttons, position: [f32; 3]) -> Sample {
        Sample {
            buttons,
            pose_valid: true,
            tracking_ok: true,
            position,
        }
    }

    fn released() -> Sample {
        pressed(Buttons::empty())
    }

    #[test]
    fn trigger_capture_roundtrip() {
        let mut collector = Collector::new(CONTROLLER);
        assert_eq!(
            collector.step(pressed_at(Buttons::TRIGGER, [1.0, 1.3, -2.0])),
            Progress::Collecting
        );
        assert_eq!(collector.step(released()), Progress::Collecting);
        assert_eq!(collector.step(pressed(Buttons::MENU)), Progress::Finished);

        let session = collector.into_session();
        assert_eq!(session.points(), &[BoundaryPoint { x: 1.0, z: -2.0 }]);
    }

    #[test]
    fn held_trigger_records_exactly_one_point() {
        let mut collector = Collector::new(CONTROLLER);
        for _ in 0..20 {
            collector.step(pressed_at(Buttons::TRIGGER, [0.5, 1.0, 0.5]));
        }
        assert_eq!(collector.session().len(), 1);

        // Release and press again: a second point.
        collector.step(released());
        collector.step(pressed_at(Buttons::TRIGGER, [1.5, 1.0, 0.5]));
        assert_eq!(collector.session().len(), 2);
    }

    #[test]
    fn invalid_pose_rejects_capture() {
        let mut collector = Collector::new(CONTROLLER);
        let mut sample = pressed(Buttons::TRIGGER);
        sample.pose_valid = false;
        collector.step(sample);
        assert_eq!(collector.session().len(), 0);

        // Not even a release wait: a fresh press with a good pose records.
        collector.step(released());
        collector.step(pressed(Buttons::TRIGGER));
        assert_eq!(collector.session().len(), 1);
    }

    #[test]
    fn degraded_tracking_rejects_capture() {
        let mut collector = Collector::new(CONTROLLER);
        let mut sample = pressed(Buttons::TRIGGER);
        sample.tracking_ok = false;
        collector.step(sample);
        assert_eq!(collector.session().len(), 0);
    }

    #[test]
    fn grip_discards_everything_recorded() {
        let mut collector = Collector::new(CONTROLLER);
        for i in 0..3 {
            collector.step(pressed_at(Buttons::TRIGGER, [i as f32, 1.0, 0.0]));
            collector.step(released());
        }
        assert_eq!(collector.session().len(), 3);

        collector.step(pressed(Buttons::GRIP));
        assert_eq!(collector.session().len(), 0);

        // Still collecting: new points accumulate from scratch.
        collector.step(released());
        collector.step(pressed_at(Buttons::TRIGGER, [9.0, 1.0, 9.0]));
        assert_eq!(
            collector.session().points(),
            &[BoundaryPoint { x: 9.0, z: 9.0 }]
        );
    }

    #[test]
    fn menu_finishes_even_with_zero_points() {
        let mut collector = Collector::new(CONTROLLER);
        assert_eq!(collector.step(pressed(Buttons::MENU)), Progress::Finished);

        let err = collector.into_session().into_points().unwrap_err();
        assert!(matches!(err, ChaperoneError::InsufficientPoints(0)));
    }

    #[test]
    fn same_tick_menu_and_trigger_finishes_without_capture() {
        let mut collector = Collector::new(CONTROLLER);
        let both = pressed_at(Buttons::MENU | Buttons::TRIGGER, [1.0, 1.0, 1.0]);
        assert_eq!(collector.step(both), Progress::Finished);
        assert_eq!(collector.session().len(), 0);
    }

    #[test]
    fn same_tick_grip_and_trigger_resets_then_captures() {
        let mut collector = Collector::new(CONTROLLER);
        collector.step(pressed_at(Buttons::TRIGGER, [1.0, 1.0, 1.0]));
        collector.step(released());
        assert_eq!(collector.session().len(), 1);

        let both = pressed_at(Buttons::GRIP | Buttons::TRIGGER, [2.0, 1.0, 2.0]);
        collector.step(both);
        assert_eq!(
            collector.session().points(),
            &[BoundaryPoint { x: 2.0, z: 2.0 }]
        );
    }

    #[test]
    fn buttons_held_through_release_wait_apply_on_release() {
        let mut collector = Collector::new(CONTROLLER);
        collector.step(pressed(Buttons::TRIGGER));
        assert_eq!(collector.session().len(), 1);

        // Menu pressed while the trigger is still held does nothing yet...
        assert_eq!(
            collector.step(pressed(Buttons::TRIGGER | Buttons::MENU)),
            Progress::Collecting
        );
        // ...but registers as an edge the moment the trigger releases.
        assert_eq!(collector.step(pressed(Buttons::MENU)), Progress::Finished);
    }

    #[test]
    fn enumeration_retries_until_a_controller_connects() {
        struct ConnectLater<'a> {
            system: &'a ScriptedSystem,
            device: DeviceIndex,
            after: u64,
            ticks: u64,
        }

        impl Ticker for ConnectLater<'_> {
            fn tick(&mut self) {
                self.ticks += 1;
                if self.ticks == self.after {
                    self.system.set_connected(self.device, true);
                }
            }
        }

        let mut system = ScriptedSystem::new(OriginMode::Standing);
        system.push_device(DeviceClass::Hmd, true, []);
        let controller = system.push_device(DeviceClass::Controller, false, []);

        let mut ticker = ConnectLater {
            system: &system,
            device: controller,
            after: 5,
            ticks: 0,
        };
        let found = wait_for_controllers(&system, &mut ticker);
        assert_eq!(found, vec![controller]);
        assert_eq!(ticker.ticks, 5);
    }

    #[test]
    fn selection_takes_the_controller_that_pulls_its_trigger() {
        let mut system = ScriptedSystem::new(OriginMode::Standing);
        // First candidate never pulls the trigger.
        let idle = system.push_device(DeviceClass::Controller, true, [released()]);
        // Second candidate pulls it on the third tick.
        let active = system.push_device(
            DeviceClass::Controller,
            true,
            [released(), released(), pressed(Buttons::TRIGGER)],
        );

        let mut ticker = ManualTicker::new();
        let selected = select_controller(&system, &mut ticker, &[idle, active]);
        assert_eq!(selected, active);
        assert_eq!(ticker.ticks, 2);
    }

    #[test]
    fn selection_skips_disconnected_candidates() {
        let mut system = ScriptedSystem::new(OriginMode::Standing);
        // Disconnected, would otherwise win on the first tick.
        let unplugged =
            system.push_device(DeviceClass::Controller, false, [pressed(Buttons::TRIGGER)]);
        let active = system.push_device(
            DeviceClass::Controller,
            true,
            [released(), pressed(Buttons::TRIGGER)],
        );

        let mut ticker = ManualTicker::new();
        let selected = select_controller(&system, &mut ticker, &[unplugged, active]);
        assert_eq!(selected, active);
    }

    #[test]
    fn release_wait_spans_the_whole_hold() {
        let mut system = ScriptedSystem::new(OriginMode::Standing);
        let device = system.push_device(
            DeviceClass::Controller,
            true,
            [
                pressed(Buttons::TRIGGER),
                pressed(Buttons::TRIGGER),
                released(),
            ],
        );

        let mut ticker = ManualTicker::new();
        await_trigger_release(&system, &mut ticker, device);
        assert_eq!(ticker.ticks, 2);
    }

    #[test]
    fn full_run_records_the_walked_corners() {
        let mut system = ScriptedSystem::new(OriginMode::Standing);
        let device = system.push_device(
            DeviceClass::Controller,
            true,
            [
                // Selection: idle tick, then the selecting pull.
                released(),
                pressed(Buttons::TRIGGER),
                // The selecting pull is still held for one more tick.
                pressed(Buttons::TRIGGER),
                released(),
                // Three corners, each a pull-and-release.
                pressed_at(Buttons::TRIGGER, [0.0, 1.1, 0.0]),
                released(),
                pressed_at(Buttons::TRIGGER, [1.0, 1.0, 0.0]),
                released(),
                pressed_at(Buttons::TRIGGER, [1.0, 0.9, 1.0]),
                released(),
                pressed(Buttons::MENU),
            ],
        );

        let mut ticker = ManualTicker::new();
        let candidates = wait_for_controllers(&system, &mut ticker);
        let active = select_controller(&system, &mut ticker, &candidates);
        assert_eq!(active, device);
        await_trigger_release(&system, &mut ticker, active);

        let session = collect(&system, &mut ticker, active);
        assert_eq!(session.controller(), device);
        let points = session.into_points().unwrap();
        assert_eq!(
            points,
            vec![
                BoundaryPoint { x: 0.0, z: 0.0 },
                BoundaryPoint { x: 1.0, z: 0.0 },
                BoundaryPoint { x: 1.0, z: 1.0 },
            ]
        );
    }
}
