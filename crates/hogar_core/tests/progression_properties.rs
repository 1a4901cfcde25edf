use hogar_core::{
    apply_task_toggle, compute_level_requirement, evaluate, generate_catalog, Achievement,
    Priority, Profile,
};
use proptest::prelude::*;

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High)
    ]
}

/// A normalized profile: xp strictly below the level requirement.
fn arb_profile() -> impl Strategy<Value = Profile> {
    (1u32..=60, 0u32..=600).prop_flat_map(|(level, tasks)| {
        let requirement = u32::try_from(compute_level_requirement(level)).unwrap();
        (0..requirement).prop_map(move |xp| Profile {
            level,
            xp,
            total_tasks_completed: tasks,
        })
    })
}

fn arb_toggle() -> impl Strategy<Value = (bool, bool, Priority)> {
    (any::<bool>(), any::<bool>(), arb_priority())
}

fn arb_catalog() -> impl Strategy<Value = Vec<Achievement>> {
    prop::collection::vec(any::<bool>(), 100).prop_map(|flags| {
        generate_catalog()
            .into_iter()
            .zip(flags)
            .map(|(achievement, unlocked)| Achievement {
                unlocked,
                ..achievement
            })
            .collect()
    })
}

#[test]
fn requirement_is_strictly_increasing() {
    for level in 1..=1_000u32 {
        let expected = 100 + u64::from(level) * u64::from(level) * 20;
        assert_eq!(compute_level_requirement(level), expected);
        assert!(compute_level_requirement(level + 1) > compute_level_requirement(level));
    }
}

proptest! {
    #[test]
    fn complete_then_revert_restores_counters_without_level_up(
        start in arb_profile(),
        priority in arb_priority(),
    ) {
        let completed = apply_task_toggle(&start, false, true, priority);
        prop_assume!(completed.level == start.level);

        let reverted = apply_task_toggle(&completed, true, false, priority);
        prop_assert_eq!(reverted.xp, start.xp);
        prop_assert_eq!(reverted.total_tasks_completed, start.total_tasks_completed);
        prop_assert_eq!(reverted.level, start.level);
    }

    #[test]
    fn toggles_keep_level_monotonic_and_xp_normalized(
        start in arb_profile(),
        toggles in prop::collection::vec(arb_toggle(), 0..64),
    ) {
        let mut profile = start;
        for (was, now, priority) in toggles {
            let next = apply_task_toggle(&profile, was, now, priority);
            prop_assert!(next.level >= profile.level);
            prop_assert!(u64::from(next.xp) < compute_level_requirement(next.level));
            if was == now {
                prop_assert_eq!(next.total_tasks_completed, profile.total_tasks_completed);
            }
            profile = next;
        }
    }

    #[test]
    fn evaluate_is_idempotent_and_preserves_shape(
        profile in arb_profile(),
        catalog in arb_catalog(),
    ) {
        let once = evaluate(&profile, &catalog);
        let twice = evaluate(&profile, &once);
        prop_assert_eq!(&once, &twice);

        prop_assert_eq!(once.len(), catalog.len());
        for (evaluated, original) in once.iter().zip(&catalog) {
            prop_assert_eq!(&evaluated.id, &original.id);
            prop_assert_eq!(evaluated.level_req, original.level_req);
            prop_assert_eq!(evaluated.tasks_req, original.tasks_req);
        }
    }
}
