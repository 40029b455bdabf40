//! The editor context.
//!
//! Everything a command needs travels through one explicit object: the
//! document, focus paths, plugin table, observers, history, and config.
//! There is no ambient global state.

use crate::history::History;
use crate::observers::{Change, Observers, SubscriptionId};
use crate::transforms::BatchState;
use crate::{
    BlockPlugin, BlockType, Document, EditorConfig, Paths, PluginRegistry, Result,
};

/// Block document engine: single-threaded, synchronous, event-driven.
pub struct Editor {
    pub(crate) document: Document,
    pub(crate) paths: Paths,
    pub(crate) plugins: PluginRegistry,
    pub(crate) observers: Observers,
    pub(crate) history: History,
    pub(crate) config: EditorConfig,
    pub(crate) batch: BatchState,
}

impl Editor {
    /// Create an editor over an empty document with default config.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            paths: Paths::default(),
            plugins: PluginRegistry::new(),
            observers: Observers::default(),
            history: History::new(config.history.max_depth, config.history.enabled),
            config,
            batch: BatchState::default(),
        }
    }

    /// Replace the document wholesale (e.g. after loading from storage).
    ///
    /// Resets paths and history; observers are not notified because no
    /// operation was applied.
    pub fn with_document(mut self, document: Document) -> Self {
        self.load_document(document);
        self
    }

    pub fn with_plugins(mut self, plugins: PluginRegistry) -> Self {
        self.plugins = plugins;
        self
    }

    /// Swap in a new document, dropping paths and history.
    pub fn load_document(&mut self, document: Document) {
        tracing::debug!(blocks = document.len(), "loading document");
        self.document = document;
        self.paths = Paths::default();
        self.history.clear();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current document snapshot.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Register a plugin for a block type.
    pub fn register_plugin(
        &mut self,
        block_type: impl Into<BlockType>,
        plugin: impl BlockPlugin + 'static,
    ) -> Result<()> {
        self.plugins.register(block_type, plugin)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback invoked once per applied batch.
    pub fn subscribe(&mut self, callback: impl FnMut(&Change<'_>) + 'static) -> SubscriptionId {
        self.observers.add(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("blocks", &self.document.len())
            .field("paths", &self.paths)
            .field("plugins", &self.plugins)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
