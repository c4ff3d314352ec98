use super::monday;
use crate::core::models::ScheduleEntry;
use crate::layout::grouper::{ChainedOverlapGrouper, OverlapGroup, OverlapGrouper};
use crate::layout::packer::{ColumnPacker, ColumnSlot, ModuloColumnPacker};

fn one_group(entries: &[ScheduleEntry]) -> OverlapGroup<'_> {
    let refs: Vec<&ScheduleEntry> = entries.iter().collect();
    let mut groups = ChainedOverlapGrouper.group(&refs);
    assert_eq!(groups.len(), 1);
    groups.remove(0)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_entry_takes_full_width() {
    let entries = [monday(1, "09:00-10:00")];
    let slots = ModuloColumnPacker::default().pack(&one_group(&entries));
    assert_eq!(slots, vec![ColumnSlot::full_width()]);
    assert_eq!(slots[0].left_percent, 0.0);
    assert_eq!(slots[0].width_percent, 100.0);
}

#[test]
fn two_overlapping_entries_split_with_gap() {
    let entries = [monday(1, "09:00-10:00"), monday(2, "09:30-10:30")];
    let slots = ModuloColumnPacker::default().pack(&one_group(&entries));

    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| close(s.width_percent, 49.75)));
    assert!(close(slots[0].left_percent, 0.0));
    assert!(close(slots[1].left_percent, 50.0));
    assert!(slots.iter().all(|s| s.z_offset == 0 && s.columns == 2));
}

#[test]
fn five_overlapping_entries_wrap_at_three_columns() {
    let entries: Vec<ScheduleEntry> = (1..=5).map(|i| monday(i, "09:00-12:00")).collect();
    let slots = ModuloColumnPacker::default().pack(&one_group(&entries));

    let columns: Vec<usize> = slots.iter().map(|s| s.column).collect();
    let z: Vec<usize> = slots.iter().map(|s| s.z_offset).collect();
    assert_eq!(columns, vec![0, 1, 2, 0, 1]);
    assert_eq!(z, vec![0, 0, 0, 1, 1]);
    assert_eq!(slots.iter().filter(|s| s.z_offset == 1).count(), 2);
    assert!(slots.iter().all(|s| s.columns == 3));
}

#[test]
fn slots_never_spill_past_the_track() {
    for max in 1..=6 {
        for gap in [0.0, 0.5, 2.0, 9.5] {
            let packer = ModuloColumnPacker::new(max, gap);
            for n in 1..=8 {
                let entries: Vec<ScheduleEntry> =
                    (1..=n).map(|i| monday(i, "08:00-09:00")).collect();
                for slot in packer.pack(&one_group(&entries)) {
                    assert!(slot.left_percent >= 0.0);
                    assert!(
                        slot.left_percent + slot.width_percent <= 100.0 + 1e-9,
                        "max={max} gap={gap} n={n} slot={slot:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn packing_is_modulo_not_minimal() {
    // A long entry and three short back-to-back ones: a coloring packer would use two
    // columns, round-robin uses three.
    let entries = [
        monday(1, "09:00-12:00"),
        monday(2, "09:00-10:00"),
        monday(3, "10:00-11:00"),
        monday(4, "11:00-12:00"),
    ];
    let slots = ModuloColumnPacker::default().pack(&one_group(&entries));
    let columns: Vec<usize> = slots.iter().map(|s| s.column).collect();
    assert_eq!(columns, vec![0, 1, 2, 0]);
    assert_eq!(slots[3].z_offset, 1);
}

#[test]
fn constructor_guards_degenerate_settings() {
    let packer = ModuloColumnPacker::new(0, -3.0);
    assert_eq!(packer.max_columns(), 1);
    assert_eq!(packer.columns_for(4), 1);

    let entries = [monday(1, "09:00-10:00"), monday(2, "09:30-10:30")];
    let slots = packer.pack(&one_group(&entries));
    assert!(slots.iter().all(|s| close(s.width_percent, 100.0) && s.left_percent == 0.0));
    assert_eq!(slots[1].z_offset, 1);
}
