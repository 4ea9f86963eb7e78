use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{GeneratorInput, GeneratorOutput};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: Uuid,
    pub input: GeneratorInput,
    pub output: GeneratorOutput,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaveRequest {
    pub input: GeneratorInput,
    pub output: GeneratorOutput,
}

/// In-memory saved prompts, newest first on listing.
#[derive(Default)]
pub struct SavedPromptStore {
    prompts: RwLock<HashMap<Uuid, SavedPrompt>>,
}

impl SavedPromptStore {
    pub fn save(&self, request: SaveRequest) -> SavedPrompt {
        let saved = SavedPrompt {
            id: Uuid::new_v4(),
            input: request.input,
            output: request.output,
            created_at: Utc::now(),
        };
        self.prompts.write().insert(saved.id, saved.clone());
        saved
    }

    pub fn get(&self, id: &Uuid) -> Option<SavedPrompt> {
        self.prompts.read().get(id).cloned()
    }

    pub fn list(&self) -> Vec<SavedPrompt> {
        let mut all: Vec<SavedPrompt> = self.prompts.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// Returns whether anything was removed.
    pub fn delete(&self, id: &Uuid) -> bool {
        self.prompts.write().remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketingGoal;
    use crate::pipeline::render_output;
    use crate::spec_builder::build_spec;

    fn request(dish: &str) -> SaveRequest {
        let input = GeneratorInput::new(dish, MarketingGoal::PromoBanner);
        let output = render_output(&input, build_spec(&input));
        SaveRequest { input, output }
    }

    #[test]
    fn save_get_delete() {
        let store = SavedPromptStore::default();
        let saved = store.save(request("Laksa"));
        assert_eq!(store.get(&saved.id), Some(saved.clone()));
        assert!(store.delete(&saved.id));
        assert!(!store.delete(&saved.id));
        assert!(store.get(&saved.id).is_none());
    }

    #[test]
    fn lists_newest_first() {
        let store = SavedPromptStore::default();
        let first = store.save(request("Laksa"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = store.save(request("Satay"));
        let ids: Vec<Uuid> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
