//! Derived progress projection.
//!
//! # Responsibility
//! - Compute a 0-100 display percentage for any goal node on demand.
//!
//! # Invariants
//! - Progress is read-only derived state and is never persisted.
//! - Each direct child weighs equally, regardless of its subtree size.

use crate::model::goal::Goal;

/// Returns completion progress for `goal` in `[0.0, 100.0]`.
///
/// A completed goal is 100. An incomplete leaf is 0. Anything else is the
/// arithmetic mean over direct children, so a deep branch counts as one
/// child of its parent rather than by leaf count.
pub fn progress(goal: &Goal) -> f64 {
    if goal.is_completed {
        return 100.0;
    }
    if goal.sub_goals.is_empty() {
        return 0.0;
    }
    let total: f64 = goal.sub_goals.iter().map(progress).sum();
    total / goal.sub_goals.len() as f64
}

#[cfg(test)]
mod tests {
    use super::progress;
    use crate::model::goal::Goal;

    fn completed_leaf(name: &str) -> Goal {
        let mut goal = Goal::new(name);
        goal.is_completed = true;
        goal
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn leaf_progress_follows_completion_flag() {
        assert_close(progress(&Goal::new("open")), 0.0);
        assert_close(progress(&completed_leaf("done")), 100.0);
    }

    #[test]
    fn two_children_at_extremes_average_to_fifty() {
        let mut parent = Goal::new("Get Fit");
        parent.sub_goals.push(completed_leaf("done"));
        parent.sub_goals.push(Goal::new("open"));

        assert_close(progress(&parent), 50.0);
    }

    #[test]
    fn deep_branches_weigh_as_one_child() {
        // One completed leaf next to a branch of three open leaves: by
        // direct-child mean this is 50, not the 25 a leaf count would give.
        let mut branch = Goal::new("branch");
        for name in ["one", "two", "three"] {
            branch.sub_goals.push(Goal::new(name));
        }

        let mut parent = Goal::new("parent");
        parent.sub_goals.push(completed_leaf("done"));
        parent.sub_goals.push(branch);

        assert_close(progress(&parent), 50.0);
    }

    #[test]
    fn partial_branch_contributes_its_mean() {
        let mut branch = Goal::new("branch");
        branch.sub_goals.push(completed_leaf("done"));
        branch.sub_goals.push(Goal::new("open"));
        branch.sub_goals.push(Goal::new("open too"));

        let mut parent = Goal::new("parent");
        parent.sub_goals.push(completed_leaf("done"));
        parent.sub_goals.push(branch);

        // (100 + 100/3) / 2
        assert_close(progress(&parent), (100.0 + 100.0 / 3.0) / 2.0);
    }

    #[test]
    fn completed_parent_short_circuits_to_hundred() {
        let mut parent = Goal::new("parent");
        parent.sub_goals.push(completed_leaf("a"));
        parent.sub_goals.push(completed_leaf("b"));
        parent.is_completed = true;

        assert_close(progress(&parent), 100.0);
    }
}
