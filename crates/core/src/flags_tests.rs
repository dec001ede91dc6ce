use super::*;

#[test]
fn union_contains_both_flags() {
    let f = SpawnFlags::CAPTURE_OUT | SpawnFlags::MERGE_STREAMS;
    assert!(f.contains(SpawnFlags::CAPTURE_OUT));
    assert!(f.contains(SpawnFlags::MERGE_STREAMS));
    assert!(!f.contains(SpawnFlags::SUPPLY_INPUT));
}

#[test]
fn bitor_assign_accumulates() {
    let mut f = SpawnFlags::NONE;
    f |= SpawnFlags::JOB_BAR_VISIBLE;
    f |= SpawnFlags::MENU_VISIBLE;
    assert!(f.contains(SpawnFlags::JOB_BAR_VISIBLE));
    assert!(f.contains(SpawnFlags::MENU_VISIBLE));
}

#[yare::parameterized(
    keep_in_fg = { SpawnFlags::KEEP_IN_FG },
    supply_input = { SpawnFlags::SUPPLY_INPUT },
    capture_out = { SpawnFlags::CAPTURE_OUT },
    merge_streams = { SpawnFlags::MERGE_STREAMS },
    job_bar_visible = { SpawnFlags::JOB_BAR_VISIBLE },
    menu_visible = { SpawnFlags::MENU_VISIBLE },
)]
fn none_contains_no_individual_flag(flag: SpawnFlags) {
    assert!(!SpawnFlags::NONE.contains(flag));
}
