use qap_qubo::{FacilityGroup, GroupPartition, ValidationError};

#[test]
fn test_group_of() {
    let p = GroupPartition::new(2, 5).unwrap();
    assert_eq!(p.cut(), 2);
    assert_eq!(p.size(), 5);
    assert_eq!(p.group_of(0), FacilityGroup::Lower);
    assert_eq!(p.group_of(1), FacilityGroup::Lower);
    assert_eq!(p.group_of(2), FacilityGroup::Upper);
    assert_eq!(p.group_of(4), FacilityGroup::Upper);
}

#[test]
fn test_allows() {
    let p = GroupPartition::new(2, 4).unwrap();
    assert!(p.allows(0, 1));
    assert!(p.allows(3, 2));
    assert!(!p.allows(1, 2));
    assert!(!p.allows(2, 1));
}

#[test]
fn test_forbidden_variables() {
    let p = GroupPartition::new(1, 3).unwrap();
    assert_eq!(p.forbidden_variables().collect::<Vec<_>>(), vec![1, 2, 3, 6]);
}

#[test]
fn test_cut_bounds() {
    assert_eq!(
        GroupPartition::new(0, 4).unwrap_err(),
        ValidationError::GroupCutOutOfRange { cut: 0, size: 4 }
    );
    assert_eq!(
        GroupPartition::new(4, 4).unwrap_err(),
        ValidationError::GroupCutOutOfRange { cut: 4, size: 4 }
    );
    assert!(GroupPartition::new(3, 4).is_ok());
}
