pub mod layout;
pub mod script;

use crate::geometry::{Point, RingGeometry};
use crate::types::weights::{Axis, WeightVector};
use tracing::debug;

pub const HANDLE_RADIUS: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Axis),
    Move(Point),
    Release,
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    pub axis: Axis,
    pub value: f64,
    pub weights: WeightVector,
}

type Listener = Box<dyn FnMut(&WeightChange)>;

pub struct RadialControl {
    ring: RingGeometry,
    weights: WeightVector,
    state: DragState,
    listeners: Vec<Listener>,
}

impl RadialControl {
    pub fn new(ring: RingGeometry, weights: WeightVector) -> Self {
        Self {
            ring,
            weights,
            state: DragState::Idle,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    pub fn ring(&self) -> &RingGeometry {
        &self.ring
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&WeightChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<WeightChange> {
        match event {
            PointerEvent::Press(axis) => {
                self.press(axis);
                None
            }
            PointerEvent::Move(point) => self.move_to(point),
            PointerEvent::Release | PointerEvent::Abandon => {
                self.release();
                None
            }
        }
    }

    /// Returns false when another handle is already held.
    pub fn press(&mut self, axis: Axis) -> bool {
        match self.state {
            DragState::Idle => {
                debug!(axis = axis.index(), "drag started");
                self.state = DragState::Dragging(axis);
                true
            }
            DragState::Dragging(held) => {
                debug!(
                    held = held.index(),
                    ignored = axis.index(),
                    "press ignored while dragging"
                );
                false
            }
        }
    }

    pub fn move_to(&mut self, point: Point) -> Option<WeightChange> {
        let DragState::Dragging(axis) = self.state else {
            return None;
        };
        let value = round3(self.ring.weight_for_point(axis.index(), point));
        self.weights.set(axis, value);
        let change = WeightChange {
            axis,
            value: self.weights.get(axis),
            weights: self.weights,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
        Some(change)
    }

    pub fn release(&mut self) {
        if let DragState::Dragging(axis) = self.state {
            debug!(axis = axis.index(), "drag released");
        }
        self.state = DragState::Idle;
    }

    /// Opens a gesture on `axis`; the drag ends when the returned scope drops.
    pub fn gesture(&mut self, axis: Axis) -> Option<Gesture<'_>> {
        if self.press(axis) {
            Some(Gesture { control: self })
        } else {
            None
        }
    }

    // later axes win on overlap
    pub fn hit_test(&self, point: Point) -> Option<Axis> {
        Axis::ALL.iter().rev().copied().find(|axis| {
            let handle = self
                .ring
                .point_for_weight(axis.index(), self.weights.get(*axis));
            (handle.x - point.x).hypot(handle.y - point.y) <= HANDLE_RADIUS
        })
    }
}

pub struct Gesture<'a> {
    control: &'a mut RadialControl,
}

impl Gesture<'_> {
    pub fn move_to(&mut self, point: Point) -> Option<WeightChange> {
        self.control.move_to(point)
    }
}

impl Drop for Gesture<'_> {
    fn drop(&mut self) {
        self.control.release();
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn control() -> RadialControl {
        RadialControl::new(RingGeometry::default(), WeightVector::default())
    }

    #[test]
    fn press_move_release_updates_one_axis() {
        let mut control = control();
        control.handle(PointerEvent::Press(Axis::Stage));
        assert_eq!(control.state(), DragState::Dragging(Axis::Stage));

        // straight up, 120 units from center: radius 120 => (120-30)/120
        let change = control
            .handle(PointerEvent::Move(Point::new(220.0, 100.0)))
            .expect("move while dragging should change the weight");
        assert_eq!(change.axis, Axis::Stage);
        assert_eq!(change.value, 0.75);
        assert_eq!(control.weights().values(), &[0.75, 0.5, 0.4, 0.3, 0.2]);

        control.handle(PointerEvent::Release);
        assert_eq!(control.state(), DragState::Idle);
        assert_eq!(control.weights().get(Axis::Stage), 0.75);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut control = control();
        assert!(control
            .handle(PointerEvent::Move(Point::new(0.0, 0.0)))
            .is_none());
        assert_eq!(control.weights(), WeightVector::default());
    }

    #[test]
    fn second_press_does_not_steal_the_drag() {
        let mut control = control();
        assert!(control.press(Axis::FunctionFit));
        assert!(!control.press(Axis::ComplianceNeed));
        assert_eq!(control.state(), DragState::Dragging(Axis::FunctionFit));
    }

    #[test]
    fn pointer_far_outside_ring_clamps_weight() {
        let mut control = control();
        control.press(Axis::Stage);
        control.move_to(Point::new(220.0, -10_000.0));
        assert_eq!(control.weights().get(Axis::Stage), 1.0);
        control.move_to(Point::new(220.0, 10_000.0));
        assert_eq!(control.weights().get(Axis::Stage), 0.0);
    }

    #[test]
    fn moved_values_are_rounded_to_three_decimals() {
        let mut control = control();
        control.press(Axis::Stage);
        let change = control
            .move_to(Point::new(220.0, 123.4567))
            .expect("weight should change");
        assert_eq!(change.value, round3(change.value));
        assert_eq!(change.value, 0.555);
    }

    #[test]
    fn listeners_see_every_change_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut control = control();
        control.subscribe(move |change| sink.borrow_mut().push(change.value));

        control.press(Axis::Stage);
        control.move_to(Point::new(220.0, 100.0));
        control.move_to(Point::new(220.0, 190.0));
        control.release();
        control.move_to(Point::new(220.0, 70.0));

        assert_eq!(*seen.borrow(), vec![0.75, 0.0]);
    }

    #[test]
    fn abandon_ends_the_drag() {
        let mut control = control();
        control.press(Axis::BudgetSensitivity);
        control.handle(PointerEvent::Abandon);
        assert_eq!(control.state(), DragState::Idle);
    }

    #[test]
    fn gesture_scope_releases_on_drop() {
        let mut control = control();
        {
            let mut gesture = control
                .gesture(Axis::Stage)
                .expect("idle control should accept a gesture");
            let change = gesture
                .move_to(Point::new(220.0, 70.0))
                .expect("held gesture should move the handle");
            assert_eq!(change.value, 1.0);
        }
        assert_eq!(control.state(), DragState::Idle);
        assert_eq!(control.weights().get(Axis::Stage), 1.0);
        assert!(control.gesture(Axis::FunctionFit).is_some());
    }

    #[test]
    fn hit_test_finds_handle_under_pointer() {
        let control = control();
        let handle = control
            .ring()
            .point_for_weight(Axis::IntegrationEffort.index(), 0.4);
        assert_eq!(
            control.hit_test(handle.offset(3.0, -2.0)),
            Some(Axis::IntegrationEffort)
        );
        assert_eq!(control.hit_test(Point::new(0.0, 0.0)), None);
    }
}
