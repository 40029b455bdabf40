//! Plugin hooks keyed by block type.
//!
//! The engine never interprets a block's payload; plugins do. A plugin is a
//! small capability trait whose methods all have no-op defaults, so a type
//! with no plugin and a plugin with no hooks look the same to call sites.

use std::collections::HashMap;

use crate::{Block, BlockType, Document, EditorError, Result};

/// Lifecycle hooks a block-type plugin may provide.
pub trait BlockPlugin {
    /// Called before a block of this type is removed, while it is still in
    /// the document.
    fn on_destroy(&self, _document: &Document, _block: &Block) {}

    /// Initial payload for a new block when the caller supplies none.
    fn on_before_create(&self, _block_type: &BlockType) -> Option<serde_json::Value> {
        None
    }
}

/// Lookup table from block type to plugin.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<BlockType, Box<dyn BlockPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Registering a type twice is a wiring mistake.
    pub fn register(
        &mut self,
        block_type: impl Into<BlockType>,
        plugin: impl BlockPlugin + 'static,
    ) -> Result<()> {
        let block_type = block_type.into();
        if self.plugins.contains_key(&block_type) {
            return Err(EditorError::DuplicatePlugin(block_type));
        }
        tracing::debug!(block_type = %block_type, "registered block plugin");
        self.plugins.insert(block_type, Box::new(plugin));
        Ok(())
    }

    pub fn get(&self, block_type: &BlockType) -> Option<&dyn BlockPlugin> {
        self.plugins.get(block_type).map(|p| p.as_ref())
    }

    pub fn contains(&self, block_type: &BlockType) -> bool {
        self.plugins.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub(crate) fn on_destroy(&self, document: &Document, block: &Block) {
        if let Some(plugin) = self.get(&block.block_type) {
            plugin.on_destroy(document, block);
        }
    }

    pub(crate) fn on_before_create(&self, block_type: &BlockType) -> Option<serde_json::Value> {
        self.get(block_type)
            .and_then(|plugin| plugin.on_before_create(block_type))
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.plugins.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("PluginRegistry").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Image;

    impl BlockPlugin for Image {
        fn on_before_create(&self, _block_type: &BlockType) -> Option<serde_json::Value> {
            Some(json!({ "src": null }))
        }
    }

    struct NoHooks;

    impl BlockPlugin for NoHooks {}

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry.register("image", Image).unwrap();
        let err = registry.register("image", NoHooks).unwrap_err();
        assert!(matches!(err, EditorError::DuplicatePlugin(t) if t.as_str() == "image"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_plugin_and_missing_hook_look_the_same() {
        let mut registry = PluginRegistry::new();
        registry.register("divider", NoHooks).unwrap();

        assert_eq!(registry.on_before_create(&"divider".into()), None);
        assert_eq!(registry.on_before_create(&"unknown".into()), None);
        assert_eq!(
            registry.on_before_create(&"image".into()),
            None,
            "image is not registered in this registry"
        );
    }

    #[test]
    fn test_before_create_supplies_payload() {
        let mut registry = PluginRegistry::new();
        registry.register("image", Image).unwrap();
        assert_eq!(
            registry.on_before_create(&"image".into()),
            Some(json!({ "src": null }))
        );
    }
}
