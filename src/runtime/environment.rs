use crate::runtime::value::Value;
use std::collections::HashMap;

/// Bindings of one evaluation frame. A frame has a single flat scope:
/// binding a name that already exists replaces it.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
        } else {
            self.bindings.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Copies every binding of `caller` whose name is not yet bound here.
    pub fn inherit(&mut self, caller: &Environment) {
        for (name, value) in &caller.bindings {
            if !self.bindings.contains_key(name) {
                self.bindings.insert(name.clone(), value.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
