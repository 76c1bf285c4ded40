//! Resolution results - the resolved dependency graph of one configuration.
//!
//! The graph is a snapshot produced by the build tool. Nodes are the root
//! (the plugin itself), selected components, and requested modules that
//! failed to resolve. Edges are either real dependencies or constraints.

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::core::configuration::{attribute, AttributeSet};

/// Identity of a resolved module version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleVersion {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// One published variant of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variant {
    /// Variant display name
    pub name: String,

    /// Variant attributes (usage, category, ...)
    pub attributes: AttributeSet,
}

impl Variant {
    /// Create a variant with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Variant {
            name: name.into(),
            attributes: AttributeSet::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// A library variant.
    pub fn library(name: impl Into<String>) -> Self {
        Variant::new(name).with_attribute(attribute::CATEGORY, attribute::CATEGORY_LIBRARY)
    }

    /// A platform (BOM) variant.
    pub fn platform(name: impl Into<String>) -> Self {
        Variant::new(name).with_attribute(attribute::CATEGORY, "platform")
    }

    /// The variant's category attribute.
    pub fn category(&self) -> Option<&str> {
        self.attributes.get(attribute::CATEGORY).map(String::as_str)
    }
}

/// A component selected by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub group: String,
    pub name: String,

    /// Selected version; absent for components without module identity
    /// (e.g. project or file components).
    pub version: Option<String>,

    /// Variants the component exposes
    pub variants: Vec<Variant>,
}

impl ResolvedComponent {
    /// Create a component with a module version and no variants.
    pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        ResolvedComponent {
            group: group.into(),
            name: name.into(),
            version: Some(version.into()),
            variants: Vec::new(),
        }
    }

    /// Add a variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// The module version identity, if the component has one.
    pub fn module_version(&self) -> Option<ModuleVersion> {
        let version = self.version.as_ref().filter(|v| !v.is_empty())?;
        Some(ModuleVersion {
            group: self.group.clone(),
            name: self.name.clone(),
            version: version.clone(),
        })
    }

    /// Check whether the component is a platform: it has exactly one
    /// variant and that variant is not a library.
    pub fn is_platform(&self) -> bool {
        match self.variants.as_slice() {
            [only] => only.category() != Some(attribute::CATEGORY_LIBRARY),
            _ => false,
        }
    }
}

/// A node in the resolution graph.
#[derive(Debug, Clone)]
pub enum GraphNode {
    /// The component being resolved
    Root { name: String },
    /// A successfully selected component
    Component(ResolvedComponent),
    /// A requested module that could not be resolved
    Unresolved { requested: String, reason: String },
}

/// Kind of an edge in the resolution graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Dependency,
    Constraint,
}

/// View of one outgoing edge of a node.
#[derive(Debug, Clone, Copy)]
pub enum DependencyResult<'a> {
    Resolved(&'a ResolvedComponent),
    Constraint(&'a GraphNode),
    Unresolved { requested: &'a str, reason: &'a str },
}

/// The resolved dependency graph of a configuration.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    graph: DiGraph<GraphNode, EdgeKind>,
    root: NodeIndex,
    components: HashMap<(String, String), NodeIndex>,
}

impl ResolutionResult {
    /// Create a graph containing only the root.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(GraphNode::Root {
            name: root_name.into(),
        });
        ResolutionResult {
            graph,
            root,
            components: HashMap::new(),
        }
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Add a node for a component, reusing an existing node for the same module.
    ///
    /// A selected component refines a node first added by a constraint: its
    /// version and variants replace the stored ones when present.
    fn component_node(&mut self, component: ResolvedComponent, selected: bool) -> NodeIndex {
        let key = (component.group.clone(), component.name.clone());
        let Some(&node) = self.components.get(&key) else {
            let node = self.graph.add_node(GraphNode::Component(component));
            self.components.insert(key, node);
            return node;
        };

        if selected {
            if let GraphNode::Component(stored) = &mut self.graph[node] {
                if component.version.is_some() {
                    stored.version = component.version;
                }
                if !component.variants.is_empty() {
                    stored.variants = component.variants;
                }
            }
        }
        node
    }

    /// Add a resolved dependency edge from `from` to `component`.
    pub fn add_dependency(&mut self, from: NodeIndex, component: ResolvedComponent) -> NodeIndex {
        let node = self.component_node(component, true);
        self.graph.add_edge(from, node, EdgeKind::Dependency);
        node
    }

    /// Add a constraint edge from `from` to `component`.
    pub fn add_constraint(&mut self, from: NodeIndex, component: ResolvedComponent) -> NodeIndex {
        let node = self.component_node(component, false);
        self.graph.add_edge(from, node, EdgeKind::Constraint);
        node
    }

    /// Add an edge to a module that failed to resolve.
    pub fn add_unresolved(
        &mut self,
        from: NodeIndex,
        requested: impl Into<String>,
        reason: impl Into<String>,
    ) -> NodeIndex {
        let node = self.graph.add_node(GraphNode::Unresolved {
            requested: requested.into(),
            reason: reason.into(),
        });
        self.graph.add_edge(from, node, EdgeKind::Dependency);
        node
    }

    /// Add a direct dependency of the root.
    pub fn add_root_dependency(&mut self, component: ResolvedComponent) -> NodeIndex {
        self.add_dependency(self.root, component)
    }

    /// Outgoing edges of a node, in the order they were added.
    pub fn dependencies_of(&self, node: NodeIndex) -> Vec<DependencyResult<'_>> {
        let mut edges: Vec<EdgeReference<'_, EdgeKind>> = self.graph.edges(node).collect();
        // petgraph yields the most recently added edge first
        edges.sort_by_key(|e| e.id());

        edges
            .into_iter()
            .map(|edge| {
                let target = &self.graph[edge.target()];
                match (edge.weight(), target) {
                    (EdgeKind::Constraint, node) => DependencyResult::Constraint(node),
                    (EdgeKind::Dependency, GraphNode::Component(component)) => {
                        DependencyResult::Resolved(component)
                    }
                    (EdgeKind::Dependency, GraphNode::Unresolved { requested, reason }) => {
                        DependencyResult::Unresolved { requested, reason }
                    }
                    (EdgeKind::Dependency, GraphNode::Root { name }) => {
                        DependencyResult::Unresolved {
                            requested: name,
                            reason: "dependency cycle back to root",
                        }
                    }
                }
            })
            .collect()
    }

    /// Direct dependencies of the root, in declaration order.
    pub fn root_dependencies(&self) -> Vec<DependencyResult<'_>> {
        self.dependencies_of(self.root)
    }

    /// Number of selected components in the graph.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
