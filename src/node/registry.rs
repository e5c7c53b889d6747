//! Node registry
//!
//! Maps stable node identifiers to their descriptors and display labels,
//! the way a host discovers what a plugin provides.

use indexmap::IndexMap;

use super::descriptor::{NodeDescriptor, TAG_FILTER};

/// Receives the one-line confirmation emitted when nodes are registered
pub trait LoadNotifier {
    fn loaded(&self, message: &str);
}

/// Forwards load confirmations to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LoadNotifier for LogNotifier {
    fn loaded(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Registered nodes, in registration order
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: IndexMap<&'static str, &'static NodeDescriptor>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; identifiers must be unique
    pub fn insert(&mut self, descriptor: &'static NodeDescriptor) -> eyre::Result<()> {
        if self.nodes.contains_key(descriptor.id) {
            eyre::bail!("Node '{}' is already registered", descriptor.id);
        }
        self.nodes.insert(descriptor.id, descriptor);
        Ok(())
    }

    /// Get a node by identifier
    pub fn get(&self, id: &str) -> Option<&'static NodeDescriptor> {
        self.nodes.get(id).copied()
    }

    /// List all registered nodes
    pub fn list(&self) -> impl Iterator<Item = &'static NodeDescriptor> + '_ {
        self.nodes.values().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Register this crate's nodes and announce them through `notifier`
pub fn register(registry: &mut NodeRegistry, notifier: &dyn LoadNotifier) -> eyre::Result<()> {
    registry.insert(&TAG_FILTER)?;
    notifier.loaded(&format!("{} node loaded ({})", TAG_FILTER.display_name, TAG_FILTER.id));
    Ok(())
}

/// A registry with this crate's nodes already installed
pub fn default_registry(notifier: &dyn LoadNotifier) -> eyre::Result<NodeRegistry> {
    let mut registry = NodeRegistry::new();
    register(&mut registry, notifier)?;
    Ok(registry)
}
