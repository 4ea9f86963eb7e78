//! Bounded response cache keyed by a content hash of the validated request.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::models::{GeneratorInput, GeneratorOutput};

pub const DEFAULT_CAPACITY: usize = 100;

/// Hex SHA-256 of the request's canonical JSON form.
pub fn cache_key(input: &GeneratorInput) -> String {
    let canonical = serde_json::to_vec(input).unwrap_or_default();
    format!("{:x}", Sha256::digest(&canonical))
}

#[derive(Default)]
struct Entries {
    outputs: HashMap<String, GeneratorOutput>,
    order: VecDeque<String>,
}

pub struct ResponseCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: Mutex::default() }
    }

    pub fn get(&self, key: &str) -> Option<GeneratorOutput> {
        self.entries.lock().outputs.get(key).cloned()
    }

    /// Inserts and evicts the oldest insertions once over capacity.
    pub fn insert(&self, key: String, output: GeneratorOutput) {
        let mut entries = self.entries.lock();
        if entries.outputs.insert(key.clone(), output).is_none() {
            entries.order.push_back(key);
        }
        while entries.outputs.len() > self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => { entries.outputs.remove(&oldest); }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}
