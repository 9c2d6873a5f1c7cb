use crate::geometry::{Point, RingGeometry};
use crate::types::weights::{Axis, WeightVector};
use serde::Serialize;

const LABEL_OFFSET: f64 = 0.16;
const VALUE_TEXT_DY: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub axis: usize,
    pub label: &'static str,
    pub vertex: Point,
    pub handle: Point,
    pub label_position: Point,
    pub value_position: Point,
    pub value: String,
}

pub fn axis_layouts(ring: &RingGeometry, weights: &WeightVector) -> Vec<AxisLayout> {
    Axis::ALL
        .iter()
        .map(|&axis| {
            let weight = weights.get(axis);
            let handle = ring.point_for_weight(axis.index(), weight);
            AxisLayout {
                axis: axis.index(),
                label: axis.label(),
                vertex: handle,
                handle,
                label_position: ring
                    .point_for_weight(axis.index(), (weight + LABEL_OFFSET).min(1.0)),
                value_position: handle.offset(0.0, VALUE_TEXT_DY),
                value: format!("{weight:.2}"),
            }
        })
        .collect()
}
