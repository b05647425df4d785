use chrono::NaiveDate;
use std::fs;

use dayline::config::Config;
use dayline::layout::{row_count, validate_items, Collision, LayoutParams, TimelinePacker};
use dayline::schedule::{day_items, ScheduleItem, TaskStore};

const TASKS: &str = r#"[
  {"id": "1", "description": "Email", "startTime": "08:00", "endTime": "09:00", "date": "2026-10-18", "status": "COMPLETED", "priority": "LOW"},
  {"id": "2", "description": "Review", "startTime": "09:30", "endTime": "10:30", "date": "2026-10-18", "status": "PENDING", "priority": "MEDIUM"},
  {"id": "3", "description": "Call", "startTime": "08:30", "endTime": "09:15", "date": "2026-10-18", "status": "PENDING", "priority": "HIGH"},
  {"id": "4", "description": "Night shift", "startTime": "23:00", "endTime": "01:00", "date": "2026-10-18", "status": "PENDING", "priority": "MEDIUM"},
  {"id": "5", "description": "Tomorrow", "startTime": "08:00", "endTime": "09:00", "date": "2026-10-19", "status": "PENDING", "priority": "MEDIUM"}
]"#;

#[test]
fn lays_out_a_cached_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, TASKS).unwrap();

    let store = TaskStore::load(&path).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let items = day_items(&store, None, date);
    assert_eq!(items.len(), 4);

    let packer = TimelinePacker::new(LayoutParams::new(10.0, 0.0, 60.0)).unwrap();
    let layout = packer.layout(&items);
    assert!(layout.rejected.is_empty());
    assert_eq!(layout.rows, 2);

    let placed: Vec<(&str, usize, f64, f64)> = layout
        .blocks
        .iter()
        .map(|b| (b.item.item_id(), b.row, b.left_px, b.width_px))
        .collect();
    // Items arrive sorted by start from the store: Email, Call, Review, Night shift
    assert_eq!(
        placed,
        [
            ("1", 0, 80.0, 60.0),
            ("3", 1, 85.0, 60.0),
            ("2", 0, 95.0, 60.0),
            ("4", 0, 230.0, 60.0),
        ]
    );
    assert!(layout.blocks[3].interval.crosses_midnight);
}

#[test]
fn pixel_collision_uses_more_rows_when_blocks_are_widened() {
    let store: TaskStore = TaskStore::new(serde_json::from_str(TASKS).unwrap());
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let items = day_items(&store, None, date);

    let config = Config {
        container_width_px: 240.0,
        collision: Collision::Pixels,
        ..Config::default()
    };
    let packer = TimelinePacker::new(config.layout_params()).unwrap();
    let validated = validate_items(&items);
    let blocks = packer.pack(&validated.slots);

    // Email [80,140), Call [85,145), Review [95,155) all collide once widened
    let rows: Vec<usize> = blocks.iter().map(|b| b.row).collect();
    assert_eq!(rows, [0, 1, 2, 0]);
    assert_eq!(row_count(&blocks), 3);
}
