//! Recursive mutation primitives for goal forests.
//!
//! # Responsibility
//! - Find nodes by id at any depth and mutate them in place.
//! - Re-derive non-leaf completion from children after structural changes.
//!
//! # Invariants
//! - New sibling entries append at the tail; existing order is never
//!   reshuffled.
//! - Every operation reports an explicit found/not-found result; a miss
//!   leaves the forest untouched.
//! - `sync_completion` never rewrites leaf completion state.

use crate::model::goal::{Goal, GoalId};

/// Returns the goal matching `id`, searching depth-first at any depth.
pub fn find_goal(goals: &[Goal], id: GoalId) -> Option<&Goal> {
    for goal in goals {
        if goal.id == id {
            return Some(goal);
        }
        if let Some(found) = find_goal(&goal.sub_goals, id) {
            return Some(found);
        }
    }
    None
}

/// Returns an exclusive handle to the goal matching `id`, at any depth.
pub fn find_goal_mut(goals: &mut [Goal], id: GoalId) -> Option<&mut Goal> {
    for goal in goals {
        if goal.id == id {
            return Some(goal);
        }
        if let Some(found) = find_goal_mut(&mut goal.sub_goals, id) {
            return Some(found);
        }
    }
    None
}

/// Appends `new_goals` at the tail of the node matching `parent_id`.
///
/// Returns `false` when no node matches, leaving the forest unchanged.
pub fn insert_sub_goals(goals: &mut [Goal], parent_id: GoalId, new_goals: Vec<Goal>) -> bool {
    match find_goal_mut(goals, parent_id) {
        Some(parent) => {
            parent.sub_goals.extend(new_goals);
            true
        }
        None => false,
    }
}

/// Removes the node matching `id` from whatever sibling list contains it,
/// discarding its entire subtree.
///
/// Returns `false` when no node matches.
pub fn delete_goal(goals: &mut Vec<Goal>, id: GoalId) -> bool {
    if let Some(index) = goals.iter().position(|goal| goal.id == id) {
        goals.remove(index);
        return true;
    }
    goals
        .iter_mut()
        .any(|goal| delete_goal(&mut goal.sub_goals, id))
}

/// Sets `name` on the node matching `id`.
///
/// Blank-name rejection is the caller's job; this function applies the
/// name it is given.
pub fn rename_goal(goals: &mut [Goal], id: GoalId, name: &str) -> bool {
    match find_goal_mut(goals, id) {
        Some(goal) => {
            goal.name = name.to_string();
            true
        }
        None => false,
    }
}

/// Flips `is_completed` on the node matching `id`, only while it is a leaf.
///
/// Non-leaf completion is derived state; toggling it directly would be
/// overwritten by the next sync pass, so the request is rejected instead.
pub fn toggle_leaf_completion(goals: &mut [Goal], id: GoalId) -> bool {
    match find_goal_mut(goals, id) {
        Some(goal) if goal.is_leaf() => {
            goal.is_completed = !goal.is_completed;
            true
        }
        _ => false,
    }
}

/// Bottom-up pass deriving non-leaf completion from children.
///
/// A non-leaf is completed iff every already-synced direct child is
/// completed. Leaves are left untouched. Idempotent.
pub fn sync_completion(goals: &mut [Goal]) {
    for goal in goals {
        if goal.is_leaf() {
            continue;
        }
        sync_completion(&mut goal.sub_goals);
        goal.is_completed = goal.sub_goals.iter().all(|sub| sub.is_completed);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        delete_goal, find_goal, insert_sub_goals, rename_goal, sync_completion,
        toggle_leaf_completion,
    };
    use crate::model::goal::{Goal, GoalId};
    use uuid::Uuid;

    fn node_count(goals: &[Goal]) -> usize {
        goals
            .iter()
            .map(|goal| 1 + node_count(&goal.sub_goals))
            .sum()
    }

    /// root -> (branch -> (leaf_a, leaf_b), leaf_c)
    fn sample_forest() -> (Vec<Goal>, GoalId, GoalId, GoalId, GoalId) {
        let leaf_a = Goal::new("leaf a");
        let leaf_b = Goal::new("leaf b");
        let leaf_c = Goal::new("leaf c");
        let (a, b, c) = (leaf_a.id, leaf_b.id, leaf_c.id);

        let mut branch = Goal::new("branch");
        branch.sub_goals.push(leaf_a);
        branch.sub_goals.push(leaf_b);
        let branch_id = branch.id;

        let mut root = Goal::new("root");
        root.sub_goals.push(branch);
        root.sub_goals.push(leaf_c);

        (vec![root], branch_id, a, b, c)
    }

    #[test]
    fn insert_appends_at_tail_of_nested_parent() {
        let (mut forest, branch_id, a, b, _) = sample_forest();

        let inserted = Goal::new("new");
        let inserted_id = inserted.id;
        assert!(insert_sub_goals(&mut forest, branch_id, vec![inserted]));

        let branch = find_goal(&forest, branch_id).expect("branch should exist");
        let ids: Vec<GoalId> = branch.sub_goals.iter().map(|goal| goal.id).collect();
        assert_eq!(ids, vec![a, b, inserted_id]);
    }

    #[test]
    fn insert_with_missing_parent_leaves_forest_unchanged() {
        let (mut forest, ..) = sample_forest();
        let before = forest.clone();

        assert!(!insert_sub_goals(
            &mut forest,
            Uuid::new_v4(),
            vec![Goal::new("orphan")]
        ));
        assert_eq!(forest, before);
    }

    #[test]
    fn delete_removes_node_and_whole_subtree() {
        let (mut forest, branch_id, ..) = sample_forest();
        assert_eq!(node_count(&forest), 5);

        assert!(delete_goal(&mut forest, branch_id));
        // branch plus its two leaves gone
        assert_eq!(node_count(&forest), 2);
        assert!(find_goal(&forest, branch_id).is_none());
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let (mut forest, branch_id, ..) = sample_forest();
        let before = forest.clone();

        let inserted = Goal::new("temporary");
        let inserted_id = inserted.id;
        assert!(insert_sub_goals(&mut forest, branch_id, vec![inserted]));
        assert!(delete_goal(&mut forest, inserted_id));
        assert_eq!(forest, before);
    }

    #[test]
    fn delete_with_missing_id_is_a_miss() {
        let (mut forest, ..) = sample_forest();
        let before = forest.clone();

        assert!(!delete_goal(&mut forest, Uuid::new_v4()));
        assert_eq!(forest, before);
    }

    #[test]
    fn rename_updates_only_the_matching_node() {
        let (mut forest, _, a, b, _) = sample_forest();

        assert!(rename_goal(&mut forest, a, "renamed"));
        assert_eq!(find_goal(&forest, a).expect("leaf a").name, "renamed");
        assert_eq!(find_goal(&forest, b).expect("leaf b").name, "leaf b");

        assert!(!rename_goal(&mut forest, Uuid::new_v4(), "nobody"));
    }

    #[test]
    fn toggle_flips_leaf_completion_both_ways() {
        let (mut forest, _, a, ..) = sample_forest();

        assert!(toggle_leaf_completion(&mut forest, a));
        assert!(find_goal(&forest, a).expect("leaf a").is_completed);

        assert!(toggle_leaf_completion(&mut forest, a));
        assert!(!find_goal(&forest, a).expect("leaf a").is_completed);
    }

    #[test]
    fn toggle_rejects_non_leaf_and_missing_targets() {
        let (mut forest, branch_id, ..) = sample_forest();
        let before = forest.clone();

        assert!(!toggle_leaf_completion(&mut forest, branch_id));
        assert!(!toggle_leaf_completion(&mut forest, Uuid::new_v4()));
        assert_eq!(forest, before);
    }

    #[test]
    fn sync_derives_parent_completion_from_children() {
        let (mut forest, _, a, b, c) = sample_forest();

        toggle_leaf_completion(&mut forest, a);
        sync_completion(&mut forest);
        let root = &forest[0];
        assert!(!root.is_completed);
        assert!(!root.sub_goals[0].is_completed);

        toggle_leaf_completion(&mut forest, b);
        sync_completion(&mut forest);
        // branch is complete, root still waits on leaf c
        assert!(forest[0].sub_goals[0].is_completed);
        assert!(!forest[0].is_completed);

        toggle_leaf_completion(&mut forest, c);
        sync_completion(&mut forest);
        assert!(forest[0].is_completed);
    }

    #[test]
    fn sync_reverts_parent_when_a_child_reopens() {
        let (mut forest, _, a, b, c) = sample_forest();
        for id in [a, b, c] {
            toggle_leaf_completion(&mut forest, id);
        }
        sync_completion(&mut forest);
        assert!(forest[0].is_completed);

        toggle_leaf_completion(&mut forest, b);
        sync_completion(&mut forest);
        assert!(!forest[0].is_completed);
        assert!(!forest[0].sub_goals[0].is_completed);
    }

    #[test]
    fn sync_is_idempotent() {
        let (mut forest, _, a, ..) = sample_forest();
        toggle_leaf_completion(&mut forest, a);

        sync_completion(&mut forest);
        let once = forest.clone();
        sync_completion(&mut forest);
        assert_eq!(forest, once);
    }

    #[test]
    fn sync_leaves_leaf_state_untouched() {
        let mut forest = vec![Goal::new("solo")];
        let id = forest[0].id;
        toggle_leaf_completion(&mut forest, id);

        sync_completion(&mut forest);
        assert!(forest[0].is_completed);
    }
}
