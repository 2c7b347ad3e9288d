use super::*;

#[test]
fn all_is_indexed_in_order() {
    for (i, id) in JointId::ALL.iter().enumerate() {
        assert_eq!(id.index(), i);
    }
}

#[test]
fn parents_precede_children() {
    for id in JointId::ALL {
        if let Some(p) = id.parent() {
            assert!(p.index() < id.index(), "{} before {}", p.name(), id.name());
        }
    }
}

#[test]
fn only_root_has_no_parent() {
    let roots: Vec<_> = JointId::ALL
        .iter()
        .filter(|id| id.parent().is_none())
        .collect();
    assert_eq!(roots, vec![&JointId::Root]);
}

#[test]
fn chains_match_body_layout() {
    assert_eq!(JointId::FrontAnkle.parent(), Some(JointId::FrontKnee));
    assert_eq!(JointId::FrontKnee.parent(), Some(JointId::FrontHip));
    assert_eq!(JointId::FrontHip.parent(), Some(JointId::Hips));
    assert_eq!(JointId::SupportHand.parent(), Some(JointId::SupportShoulder));
    assert_eq!(JointId::FreeShoulder.parent(), Some(JointId::Shoulders));
    assert_eq!(JointId::Head.parent(), Some(JointId::Neck));
    assert_eq!(JointId::Neck.parent(), Some(JointId::Root));
    assert_eq!(JointId::FrontAnkle.depth(), 4);
    assert_eq!(JointId::Head.depth(), 2);
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = JointId::ALL.iter().map(|id| id.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), JointId::COUNT);
}

#[test]
fn back_leg_runs_against_front() {
    assert_eq!(LegSide::Front.drive(0.5), 0.5);
    assert!((LegSide::Back.drive(0.5) + 0.45).abs() < 1e-12);
    assert_eq!(LegSide::Front.ankle(), JointId::FrontAnkle);
    assert_eq!(LegSide::Back.knee(), JointId::BackKnee);
}
