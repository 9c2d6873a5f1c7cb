
use crate::types::weights::{clamp_unit, AXIS_COUNT};
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            center: Point::new(220.0, 220.0),
            min_radius: 30.0,
            max_radius: 150.0,
        }
    }
}

/// Axis 0 points up; the rest follow clockwise at even spacing.
pub fn angle_for_axis(index: usize, axis_count: usize) -> f64 {
    2.0 * PI * index as f64 / axis_count as f64 - PI / 2.0
}

impl RingGeometry {
    pub fn angle(&self, index: usize) -> f64 {
        angle_for_axis(index, AXIS_COUNT)
    }

    pub fn point_for_weight(&self, index: usize, weight: f64) -> Point {
        let angle = self.angle(index);
        let radius = self.min_radius + (self.max_radius - self.min_radius) * weight;
        Point::new(
            self.center.x + radius * angle.cos(),
            self.center.y + radius * angle.sin(),
        )
    }

    pub fn weight_for_point(&self, index: usize, point: Point) -> f64 {
        let angle = self.angle(index);
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let projected = dx * angle.cos() + dy * angle.sin();
        let radius = projected.clamp(self.min_radius, self.max_radius);
        clamp_unit((radius - self.min_radius) / (self.max_radius - self.min_radius))
    }
}
