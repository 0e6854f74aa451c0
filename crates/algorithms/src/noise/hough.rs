//! Progressive probabilistic Hough transform
//!
//! Edge pixels are visited in random order. Each one votes in a
//! (theta, rho) accumulator; as soon as a bin reaches the vote threshold the
//! corresponding line is followed from the pixel in both directions,
//! bridging gaps up to `max_line_gap`. Pixels on the walked corridor are
//! consumed, and when the walk is long enough their votes are withdrawn and
//! the segment is reported.
//!
//! Reference: Matas, Galambos & Kittler (2000), "Robust Detection of Lines
//! Using the Progressive Probabilistic Hough Transform".

use std::f64::consts::PI;

use phenomask_core::raster::Mask;
use phenomask_core::{Error, RasterElement, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::collaborators::{Segment, SegmentDetector, SegmentSearch};

/// Fixed-point fraction bits used while walking a line
const SHIFT: u32 = 16;

/// Largest accumulator, in bins, a resolution may ask for
const MAX_ACCUMULATOR_BINS: usize = 1 << 26;

/// Parameters of the Hough accumulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressiveHough {
    /// Angular resolution in radians
    pub theta: f64,
    /// Distance resolution in pixels
    pub rho: f64,
    /// Seed of the pixel visiting order
    pub seed: u64,
}

impl Default for ProgressiveHough {
    fn default() -> Self {
        Self {
            theta: PI / 180.0,
            rho: 1.0,
            seed: 0,
        }
    }
}

impl ProgressiveHough {
    fn validate(&self) -> Result<()> {
        if !(self.theta.is_finite() && self.theta > 0.0 && self.theta <= PI) {
            return Err(Error::InvalidParameter {
                name: "theta",
                value: self.theta.to_string(),
                reason: "must be in (0, pi]".into(),
            });
        }
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(Error::InvalidParameter {
                name: "rho",
                value: self.rho.to_string(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

struct Accumulator {
    /// `(cos, sin)` of every angle, scaled by `1 / rho`
    trig: Vec<(f64, f64)>,
    num_rho: usize,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(theta: f64, rho: f64, rows: usize, cols: usize) -> Result<Self> {
        let num_angle = ((PI / theta).round() as usize).max(1);
        let num_rho = ((((rows + cols) * 2 + 1) as f64) / rho).round() as usize;
        let bins = num_angle
            .checked_mul(num_rho)
            .filter(|&bins| bins <= MAX_ACCUMULATOR_BINS)
            .ok_or_else(|| Error::InvalidParameter {
                name: "rho",
                value: format!("{} (theta {})", rho, theta),
                reason: format!(
                    "{} x {} accumulator exceeds {} bins",
                    num_angle, num_rho, MAX_ACCUMULATOR_BINS
                ),
            })?;

        let irho = 1.0 / rho;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f64 * theta;
                (angle.cos() * irho, angle.sin() * irho)
            })
            .collect();
        Ok(Self {
            trig,
            num_rho,
            votes: vec![0; bins],
        })
    }

    fn bin(&self, n: usize, x: usize, y: usize) -> Option<usize> {
        let (cos, sin) = self.trig[n];
        let r = (x as f64 * cos + y as f64 * sin).round() as i64 + (self.num_rho as i64 - 1) / 2;
        (0..self.num_rho as i64)
            .contains(&r)
            .then(|| n * self.num_rho + r as usize)
    }

    /// Add one vote per angle; returns the strongest angle and its count
    fn vote(&mut self, x: usize, y: usize) -> (usize, i32) {
        let mut best = (0, 0);
        for n in 0..self.trig.len() {
            if let Some(i) = self.bin(n, x, y) {
                self.votes[i] += 1;
                if self.votes[i] > best.1 {
                    best = (n, self.votes[i]);
                }
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            if let Some(i) = self.bin(n, x, y) {
                self.votes[i] -= 1;
            }
        }
    }
}

/// Fixed-point walk along a line, one pixel per step on the major axis
#[derive(Clone, Copy)]
struct Walk {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl Walk {
    fn new(x: usize, y: usize, cos: f64, sin: f64) -> Self {
        // line direction is perpendicular to the normal (cos, sin)
        let a = -sin;
        let b = cos;
        let (x, y) = (x as i64, y as i64);
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);

        if a.abs() > b.abs() {
            Self {
                x,
                y: (y << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x: (x << SHIFT) + half,
                y,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    fn reversed(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..*self
        }
    }

    fn pixel(&self) -> (i64, i64) {
        if self.x_major {
            (self.x, self.y >> SHIFT)
        } else {
            (self.x >> SHIFT, self.y)
        }
    }

    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}

fn in_bounds((x, y): (i64, i64), rows: usize, cols: usize) -> Option<(usize, usize)> {
    (x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows).then(|| (x as usize, y as usize))
}

impl SegmentDetector for ProgressiveHough {
    fn detect_segments(&self, edges: &Mask, search: &SegmentSearch) -> Result<Vec<Segment>> {
        self.validate()?;

        let (rows, cols) = edges.shape();
        if rows == 0 || cols == 0 {
            return Ok(Vec::new());
        }

        let threshold = search.threshold.max(1) as i32;
        let min_length = search.min_line_length as i64;
        let max_gap = search.max_line_gap;

        let mut live = vec![false; rows * cols];
        let mut points = Vec::new();
        for ((y, x), v) in edges.data().indexed_iter() {
            if v.is_foreground() {
                live[y * cols + x] = true;
                points.push((x, y));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        points.shuffle(&mut rng);

        let mut acc = Accumulator::new(self.theta, self.rho, rows, cols)?;
        let mut segments = Vec::new();

        for &(x, y) in &points {
            if !live[y * cols + x] {
                continue;
            }

            let (best_n, best_votes) = acc.vote(x, y);
            if best_votes < threshold {
                continue;
            }

            let (cos, sin) = acc.trig[best_n];
            let forward = Walk::new(x, y, cos, sin);
            let mut ends = [(x, y); 2];

            for (k, end) in ends.iter_mut().enumerate() {
                let mut walk = if k == 0 { forward } else { forward.reversed() };
                let mut gap = 0;
                while let Some((px, py)) = in_bounds(walk.pixel(), rows, cols) {
                    if live[py * cols + px] {
                        gap = 0;
                        *end = (px, py);
                    } else {
                        gap += 1;
                        if gap > max_gap {
                            break;
                        }
                    }
                    walk.step();
                }
            }

            let good = (ends[1].0 as i64 - ends[0].0 as i64).abs() >= min_length
                || (ends[1].1 as i64 - ends[0].1 as i64).abs() >= min_length;

            for (k, &end) in ends.iter().enumerate() {
                let mut walk = if k == 0 { forward } else { forward.reversed() };
                while let Some((px, py)) = in_bounds(walk.pixel(), rows, cols) {
                    let cell = &mut live[py * cols + px];
                    if *cell {
                        if good {
                            acc.unvote(px, py);
                        }
                        *cell = false;
                    }
                    if (px, py) == end {
                        break;
                    }
                    walk.step();
                }
            }

            if good {
                segments.push(Segment::new(
                    ends[0].0 as isize,
                    ends[0].1 as isize,
                    ends[1].0 as isize,
                    ends[1].1 as isize,
                ));
            }
        }

        Ok(segments)
    }
}
