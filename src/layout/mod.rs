mod packer;
mod stats;

pub use packer::{
    row_count, validate_items, Collision, DayLayout, LayoutError, LayoutItem, LayoutParams, Rejection, Slot,
    TimelinePacker, Validated,
};
pub use stats::{conflicts, is_slot_available, DayStats};
