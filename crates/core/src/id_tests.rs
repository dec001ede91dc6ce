use super::*;

#[test]
fn ids_are_distinct_and_increasing() {
    let gen = JobIdGen::new();
    let a = gen.next();
    let b = gen.next();
    assert!(a.as_u64() < b.as_u64());
    assert_ne!(a, b);
}

#[test]
fn id_displays_as_number() {
    let id = JobId::new(42);
    assert_eq!(id.to_string(), "42");
}
