use envdelta_core::Snapshot;

/// Build a snapshot from literal pairs
#[allow(dead_code)]
pub fn snap(pairs: &[(&str, &str)]) -> Snapshot {
    Snapshot::from_pairs(pairs.iter().copied()).expect("test snapshot must be valid")
}

/// `local = {A:1, B:2, C:3}`
#[allow(dead_code)]
pub fn example_local() -> Snapshot {
    snap(&[("A", "1"), ("B", "2"), ("C", "3")])
}

/// `remote = {A:1, B:9, D:4}`
#[allow(dead_code)]
pub fn example_remote() -> Snapshot {
    snap(&[("A", "1"), ("B", "9"), ("D", "4")])
}
