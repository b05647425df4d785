//! First-fit row packing for one day's timeline.
//!
//! Items are placed left to right by time of day. Each item goes into the
//! lowest row where it collides with nothing already placed there; when no
//! row fits, a new row is opened. Processing items in start order makes this
//! greedy assignment use exactly as many rows as the deepest point of
//! overlap in the day.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::schedule::{ScheduleError, ScheduleItem, TimeInterval};

/// Tolerance for comparing pixel edges computed in floating point
const EDGE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid layout parameters: {0}")]
    InvalidParams(String),
}

/// What two blocks are compared on when deciding whether they may share a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Collision {
    /// Scheduled time spans. Back-to-back items share a row even if the
    /// minimum width makes their blocks touch or overlap on screen.
    #[default]
    Time,
    /// Rendered pixel spans after minimum-width widening. Blocks in one row
    /// never overlap visually.
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub pixels_per_hour: f64,
    pub left_offset_px: f64,
    pub min_width_px: f64,
    pub collision: Collision,
}

impl LayoutParams {
    pub fn new(pixels_per_hour: f64, left_offset_px: f64, min_width_px: f64) -> Self {
        Self {
            pixels_per_hour,
            left_offset_px,
            min_width_px,
            collision: Collision::default(),
        }
    }

    pub fn with_collision(mut self, collision: Collision) -> Self {
        self.collision = collision;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.pixels_per_hour.is_finite() && self.pixels_per_hour > 0.0) {
            return Err(LayoutError::InvalidParams(format!(
                "pixels per hour must be positive, got {}",
                self.pixels_per_hour
            )));
        }
        if !(self.min_width_px.is_finite() && self.min_width_px >= 0.0) {
            return Err(LayoutError::InvalidParams(format!(
                "minimum width must be non-negative, got {}",
                self.min_width_px
            )));
        }
        if !self.left_offset_px.is_finite() {
            return Err(LayoutError::InvalidParams("left offset must be finite".to_string()));
        }
        Ok(())
    }
}

/// A validated item ready for packing
#[derive(Debug)]
pub struct Slot<'a, T> {
    /// Position of the item in the caller's input
    pub index: usize,
    pub item: &'a T,
    pub interval: TimeInterval,
}

/// An input item that failed boundary validation
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub index: usize,
    pub item_id: String,
    pub error: ScheduleError,
}

#[derive(Debug)]
pub struct Validated<'a, T> {
    pub slots: Vec<Slot<'a, T>>,
    pub rejected: Vec<Rejection>,
}

/// Parse every item's times, splitting well-formed items from rejected ones.
/// Accepted slots keep input order.
pub fn validate_items<T: ScheduleItem>(items: &[T]) -> Validated<'_, T> {
    let mut slots = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match item.interval() {
            Ok(interval) => slots.push(Slot { index, item, interval }),
            Err(error) => {
                warn!(index, id = item.item_id(), %error, "rejecting timeline item");
                rejected.push(Rejection {
                    index,
                    item_id: item.item_id().to_string(),
                    error,
                });
            }
        }
    }

    Validated { slots, rejected }
}

/// Placement of one item on the timeline
#[derive(Debug)]
pub struct LayoutItem<'a, T> {
    pub item: &'a T,
    pub index: usize,
    pub interval: TimeInterval,
    pub left_px: f64,
    pub width_px: f64,
    pub row: usize,
}

impl<T> LayoutItem<'_, T> {
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }

    /// Vertical offset of this item's row for a renderer
    pub fn top_px(&self, base_offset_px: f64, row_height_px: f64) -> f64 {
        base_offset_px + self.row as f64 * row_height_px
    }
}

/// Half-open span on whichever axis rows are packed against
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    end: f64,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start + EDGE_EPSILON || self.start >= other.end - EDGE_EPSILON)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimelinePacker {
    params: LayoutParams,
}

impl TimelinePacker {
    pub fn new(params: LayoutParams) -> Result<Self, LayoutError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Horizontal (left, width) in pixels for an interval
    pub fn geometry(&self, interval: &TimeInterval) -> (f64, f64) {
        let p = &self.params;
        // Multiply before dividing so whole-pixel results stay exact
        let left = p.left_offset_px + interval.start_minutes as f64 * p.pixels_per_hour / 60.0;
        let width = (interval.duration_minutes() as f64 * p.pixels_per_hour / 60.0).max(p.min_width_px);
        (left, width)
    }

    /// Assign geometry and rows to validated slots.
    ///
    /// Returns one [`LayoutItem`] per slot, in slot order.
    pub fn pack<'a, T>(&self, slots: &[Slot<'a, T>]) -> Vec<LayoutItem<'a, T>> {
        let mut layout: Vec<LayoutItem<'a, T>> = slots
            .iter()
            .map(|slot| {
                let (left_px, width_px) = self.geometry(&slot.interval);
                LayoutItem {
                    item: slot.item,
                    index: slot.index,
                    interval: slot.interval,
                    left_px,
                    width_px,
                    row: 0,
                }
            })
            .collect();

        let mut order: Vec<usize> = (0..layout.len()).collect();
        order.sort_by_key(|&i| (layout[i].interval.start_minutes, layout[i].index));

        let mut rows: Vec<Vec<Span>> = Vec::new();
        for i in order {
            let span = self.span_of(&layout[i]);
            let row = match rows.iter().position(|placed| placed.iter().all(|s| !span.overlaps(s))) {
                Some(row) => row,
                None => {
                    rows.push(Vec::new());
                    rows.len() - 1
                }
            };
            rows[row].push(span);
            layout[i].row = row;
        }

        debug!(items = layout.len(), rows = rows.len(), collision = ?self.params.collision, "packed timeline");
        layout
    }

    /// Validate and pack in one step
    pub fn layout<'a, T: ScheduleItem>(&self, items: &'a [T]) -> DayLayout<'a, T> {
        self.pack_validated(validate_items(items))
    }

    /// Pack items that were already validated, carrying their rejections along
    pub fn pack_validated<'a, T>(&self, validated: Validated<'a, T>) -> DayLayout<'a, T> {
        let Validated { slots, rejected } = validated;
        let blocks = self.pack(&slots);
        let rows = row_count(&blocks);
        DayLayout { blocks, rejected, rows }
    }

    fn span_of<T>(&self, item: &LayoutItem<'_, T>) -> Span {
        match self.params.collision {
            Collision::Time => Span {
                start: item.interval.start_minutes as f64,
                end: item.interval.end_minutes as f64,
            },
            Collision::Pixels => Span {
                start: item.left_px,
                end: item.right_px(),
            },
        }
    }
}

/// Packed timeline for one day together with the items that could not be placed
#[derive(Debug)]
pub struct DayLayout<'a, T> {
    pub blocks: Vec<LayoutItem<'a, T>>,
    pub rejected: Vec<Rejection>,
    pub rows: usize,
}

/// Number of rows used by a packed layout
pub fn row_count<T>(layout: &[LayoutItem<'_, T>]) -> usize {
    layout.iter().map(|b| b.row + 1).max().unwrap_or(0)
}
