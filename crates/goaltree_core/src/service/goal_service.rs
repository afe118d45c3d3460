//! Goal orchestration service.
//!
//! # Responsibility
//! - Own the live forest and expose every mutation entry point.
//! - Run completion sync and persistence after each mutation.
//!
//! # Invariants
//! - Mutations never fail to the caller; missing targets and blank names
//!   are silent no-ops.
//! - Only `generate_sub_goals` propagates errors, so the calling surface
//!   can reset its loading affordance.
//! - The stored payload always reflects the last completed mutation.

use crate::model::goal::{Category, CategoryId, Forest, Goal, GoalId};
use crate::repo::forest_repo::ForestStore;
use crate::suggest::{SuggestResult, SuggestionClient};
use crate::tree::mutate;
use log::{debug, info, warn};

/// Use-case facade owning the forest plus its storage and suggestion
/// collaborators.
pub struct GoalService<S: ForestStore, C: SuggestionClient> {
    forest: Forest,
    store: S,
    suggester: C,
}

impl<S: ForestStore, C: SuggestionClient> GoalService<S, C> {
    /// Creates the service and loads the persisted forest once.
    pub fn new(store: S, suggester: C) -> Self {
        let forest = store.load();
        Self {
            forest,
            store,
            suggester,
        }
    }

    /// Read-only view of the current forest in display order.
    pub fn categories(&self) -> &[Category] {
        &self.forest
    }

    /// Appends a new empty category. Blank names create nothing.
    pub fn add_category(&mut self, name: &str) -> Option<CategoryId> {
        let name = normalize_name(name)?;
        let category = Category::new(name);
        let id = category.id;
        self.forest.push(category);
        self.commit();
        Some(id)
    }

    /// Removes a category and every goal tree it owns.
    pub fn delete_category(&mut self, id: CategoryId) -> bool {
        let before = self.forest.len();
        self.forest.retain(|category| category.id != id);
        let removed = self.forest.len() != before;
        if removed {
            self.commit();
        }
        removed
    }

    /// Renames a category. Blank names and missing ids are no-ops.
    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            return false;
        };
        match self.forest.iter_mut().find(|category| category.id == id) {
            Some(category) => {
                category.name = name;
                self.commit();
                true
            }
            None => false,
        }
    }

    /// Appends a new leaf goal at the tail of a category.
    pub fn add_goal(&mut self, name: &str, category_id: CategoryId) -> Option<GoalId> {
        let name = normalize_name(name)?;
        let category = self
            .forest
            .iter_mut()
            .find(|category| category.id == category_id)?;
        let goal = Goal::new(name);
        let id = goal.id;
        category.goals.push(goal);
        self.commit();
        Some(id)
    }

    /// Appends a new leaf goal under an existing goal, at any depth.
    pub fn add_sub_goal(&mut self, name: &str, parent_id: GoalId) -> Option<GoalId> {
        let name = normalize_name(name)?;
        let goal = Goal::new(name);
        let id = goal.id;
        if !self.insert_under(parent_id, vec![goal]) {
            debug!("event=goal_add module=service status=missing_parent parent_id={parent_id}");
            return None;
        }
        self.commit();
        Some(id)
    }

    /// Removes a goal and its whole subtree from whichever category owns it.
    pub fn delete_goal(&mut self, id: GoalId) -> bool {
        let removed = self
            .forest
            .iter_mut()
            .any(|category| mutate::delete_goal(&mut category.goals, id));
        if removed {
            self.commit();
        }
        removed
    }

    /// Renames a goal. Blank names and missing ids are no-ops.
    pub fn rename_goal(&mut self, id: GoalId, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            return false;
        };
        let renamed = self
            .forest
            .iter_mut()
            .any(|category| mutate::rename_goal(&mut category.goals, id, &name));
        if renamed {
            self.commit();
        }
        renamed
    }

    /// Flips completion on a leaf goal; non-leaf targets are rejected.
    pub fn toggle_goal_completion(&mut self, id: GoalId) -> bool {
        let toggled = self
            .forest
            .iter_mut()
            .any(|category| mutate::toggle_leaf_completion(&mut category.goals, id));
        if toggled {
            self.commit();
        }
        toggled
    }

    /// Requests AI sub-goal suggestions and appends them under `parent_id`.
    ///
    /// Suggestion failures propagate unchanged so the caller can reset its
    /// loading affordance and notify the user. Zero suggestions, or a
    /// parent deleted while the call was in flight, mutate nothing and
    /// return an empty id list.
    pub fn generate_sub_goals(
        &mut self,
        parent_id: GoalId,
        parent_name: &str,
    ) -> SuggestResult<Vec<GoalId>> {
        let names = self.suggester.suggest_sub_goals(parent_name)?;
        if names.is_empty() {
            info!("event=suggest_apply module=service status=empty parent_id={parent_id}");
            return Ok(Vec::new());
        }

        let new_goals: Vec<Goal> = names.into_iter().map(Goal::new).collect();
        let ids: Vec<GoalId> = new_goals.iter().map(|goal| goal.id).collect();
        if !self.insert_under(parent_id, new_goals) {
            warn!("event=suggest_apply module=service status=missing_parent parent_id={parent_id}");
            return Ok(Vec::new());
        }

        info!(
            "event=suggest_apply module=service status=ok parent_id={parent_id} count={}",
            ids.len()
        );
        self.commit();
        Ok(ids)
    }

    fn insert_under(&mut self, parent_id: GoalId, new_goals: Vec<Goal>) -> bool {
        match self
            .forest
            .iter_mut()
            .find(|category| mutate::find_goal(&category.goals, parent_id).is_some())
        {
            Some(category) => mutate::insert_sub_goals(&mut category.goals, parent_id, new_goals),
            None => false,
        }
    }

    fn commit(&mut self) {
        for category in &mut self.forest {
            mutate::sync_completion(&mut category.goals);
        }
        self.store.save(&self.forest);
    }
}

fn normalize_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
