//! Skill tree view: the catalog's skills joined with unlock state and
//! affordability.

use crate::game::content::SkillDefinition;
use crate::game::engine::RulesEngine;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    pub definition: SkillDefinition,
    pub unlocked: bool,
    /// Enough points to pay the cost, regardless of whether it is unlocked.
    pub can_afford: bool,
}

pub struct SkillTree<'a> {
    engine: &'a mut RulesEngine,
}

impl<'a> SkillTree<'a> {
    pub fn new(engine: &'a mut RulesEngine) -> Self {
        Self { engine }
    }

    pub fn skills(&self) -> Vec<SkillNode> {
        let state = self.engine.state();
        self.engine
            .catalog()
            .skills
            .iter()
            .map(|definition| SkillNode {
                definition: definition.clone(),
                unlocked: state.has_skill(&definition.id),
                can_afford: state.skill_points >= definition.cost,
            })
            .collect()
    }

    pub fn unlock(&mut self, skill_id: &str) -> bool {
        self.engine.unlock_skill(skill_id)
    }

    pub fn available_points(&self) -> u32 {
        self.engine.state().skill_points
    }
}

pub fn format_skill_tree(nodes: &[SkillNode], points: u32) -> String {
    let mut output = format!("=== SKILL TREE ({} pts) ===\n", points);
    for node in nodes {
        let status = if node.unlocked {
            "owned"
        } else if node.can_afford {
            "ready"
        } else {
            "locked"
        };
        output.push_str(&format!(
            "{} {} [{}] cost {} - {} ({})\n",
            node.definition.icon,
            node.definition.name,
            node.definition.id,
            node.definition.cost,
            node.definition.description,
            status
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::backends::MemoryBackend;
    use crate::game::content::Catalog;
    use crate::game::storage::StateStore;
    use crate::game::types::Category;

    #[test]
    fn nodes_reflect_points_and_unlocks() {
        let mut engine =
            RulesEngine::new(Catalog::standard(), StateStore::open(MemoryBackend::new()));
        engine.add_xp(100, Category::Coding);

        let mut tree = SkillTree::new(&mut engine);
        assert_eq!(tree.available_points(), 1);
        let nodes = tree.skills();
        assert_eq!(nodes.len(), 4);
        let affordable: Vec<&str> = nodes
            .iter()
            .filter(|n| n.can_afford)
            .map(|n| n.definition.id.as_str())
            .collect();
        assert_eq!(affordable, vec!["studyMastery", "focusShield"]);

        assert!(!tree.unlock("codingGenius"));
        assert!(tree.unlock("focusShield"));
        assert_eq!(tree.available_points(), 0);

        let nodes = tree.skills();
        assert!(nodes.iter().any(|n| n.definition.id == "focusShield" && n.unlocked));
        assert!(nodes.iter().all(|n| !n.can_afford));
        assert!(format_skill_tree(&nodes, 0).contains("Focus Shield [focusShield] cost 1"));
    }
}
