#![forbid(unsafe_code)]

//! One-dimensional flex layout.
//!
//! Fixed and percentage constraints are allocated first, in order; whatever
//! remains is shared between the growable constraints (`Min`, `Max`,
//! `Ratio`). `Max` items are clamped last, so clamped space is left unused.

use std::cmp::min;

use bcap_render::{Rect, Sides};

/// A constraint on the size of a layout item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// An exact size in cells.
    Fixed(u16),
    /// A percentage of the total available size (0.0 to 100.0).
    Percentage(f32),
    /// A minimum size in cells; grows into leftover space.
    Min(u16),
    /// A maximum size in cells; grows into leftover space up to the cap.
    Max(u16),
    /// A weighted share of the leftover space (numerator, denominator).
    Ratio(u32, u32),
}

/// The direction to lay items out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    margin: Sides,
    gap: u16,
}

impl Flex {
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Split `area` into one rectangle per constraint.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let inner = area.inner(self.margin);
        if inner.is_empty() {
            let empty = Rect::new(inner.x, inner.y, 0, 0);
            return self.constraints.iter().map(|_| empty).collect();
        }

        let total_size = match self.direction {
            Direction::Horizontal => inner.width,
            Direction::Vertical => inner.height,
        };

        let count = self.constraints.len();
        if count == 0 {
            return Vec::new();
        }

        let total_gap = self.gap.saturating_mul((count - 1) as u16);
        let available_size = total_size.saturating_sub(total_gap);
        let sizes = self.solve_constraints(available_size);
        self.sizes_to_rects(inner, &sizes)
    }

    fn solve_constraints(&self, available_size: u16) -> Vec<u16> {
        let mut sizes = vec![0u16; self.constraints.len()];
        let mut remaining = available_size;
        let mut grow_indices = Vec::new();

        for (i, &constraint) in self.constraints.iter().enumerate() {
            match constraint {
                Constraint::Fixed(size) => {
                    let size = min(size, remaining);
                    sizes[i] = size;
                    remaining -= size;
                }
                Constraint::Percentage(p) => {
                    let size = (available_size as f32 * p.clamp(0.0, 100.0) / 100.0).round() as u16;
                    let size = min(size, remaining);
                    sizes[i] = size;
                    remaining -= size;
                }
                Constraint::Min(min_size) => {
                    let size = min(min_size, remaining);
                    sizes[i] = size;
                    remaining -= size;
                    grow_indices.push(i);
                }
                Constraint::Max(_) | Constraint::Ratio(_, _) => grow_indices.push(i),
            }
        }

        if remaining > 0 && !grow_indices.is_empty() {
            let weight = |constraint: Constraint| -> u64 {
                match constraint {
                    Constraint::Ratio(n, d) => n as u64 * 100 / d.max(1) as u64,
                    _ => 100,
                }
            };
            let total_weight = grow_indices
                .iter()
                .map(|&i| weight(self.constraints[i]))
                .sum::<u64>()
                .max(1);

            let mut allocated = 0u16;
            for (idx, &i) in grow_indices.iter().enumerate() {
                // The last grower takes the rounding remainder so sizes sum exactly.
                let size = if idx == grow_indices.len() - 1 {
                    remaining - allocated
                } else {
                    let share = (remaining as u64 * weight(self.constraints[i]) / total_weight) as u16;
                    min(share, remaining - allocated)
                };
                sizes[i] += size;
                allocated += size;
            }
        }

        for (i, &constraint) in self.constraints.iter().enumerate() {
            if let Constraint::Max(max_size) = constraint {
                sizes[i] = sizes[i].min(max_size);
            }
        }

        sizes
    }

    fn sizes_to_rects(&self, area: Rect, sizes: &[u16]) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(sizes.len());
        let (mut current_pos, end) = match self.direction {
            Direction::Horizontal => (area.x, area.right()),
            Direction::Vertical => (area.y, area.bottom()),
        };

        // Gaps that do not fit collapse items onto the far edge.
        for &size in sizes {
            current_pos = current_pos.min(end);
            let size = size.min(end - current_pos);
            let rect = match self.direction {
                Direction::Horizontal => Rect::new(current_pos, area.y, size, area.height),
                Direction::Vertical => Rect::new(area.x, current_pos, area.width, size),
            };
            rects.push(rect);
            current_pos = current_pos.saturating_add(size).saturating_add(self.gap);
        }

        rects
    }
}
