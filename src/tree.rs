// src/tree.rs
// Ordered tree container for parse results. No algorithmic content: children
// in order, named attributes, and an indented rendering for diagnostics.

use std::{collections::BTreeMap, fmt};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no child at index {index} (node has {len})")]
    NoSuchChild { index: usize, len: usize },

    #[error("no attribute named {0:?}")]
    NoSuchAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<V> {
    children: Vec<Node<V>>,
    attributes: BTreeMap<String, V>,
}

impl<V> Node<V> {
    pub fn new<C, A, K>(children: C, attributes: A) -> Self
    where
        C: IntoIterator<Item = Node<V>>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self {
            children: children.into_iter().collect(),
            attributes: attributes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn leaf<A, K>(attributes: A) -> Self
    where
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self::new(Vec::new(), attributes)
    }

    pub fn subnode(&self, index: usize) -> Result<&Node<V>, LookupError> {
        self.children.get(index).ok_or(LookupError::NoSuchChild {
            index,
            len: self.children.len(),
        })
    }

    pub fn attribute(&self, name: &str) -> Result<&V, LookupError> {
        self.attributes
            .get(name)
            .ok_or_else(|| LookupError::NoSuchAttribute(name.to_string()))
    }

    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    pub fn attributes(&self) -> &BTreeMap<String, V> {
        &self.attributes
    }

    pub fn push(&mut self, child: Node<V>) {
        self.children.push(child);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<V: fmt::Display> Node<V> {
    fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        level: usize,
        spacer: &str,
        last: bool,
    ) -> fmt::Result {
        if level > 0 {
            let branch = if last { "└── " } else { "├── " };
            write!(f, "\n{spacer}{branch}")?;
        }

        write!(f, "Node{{")?;
        for (i, (k, v)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")?;

        let child_spacer = match (level, last) {
            (0, _) => String::new(),
            (_, true) => format!("{spacer}    "),
            (_, false) => format!("{spacer}│   "),
        };
        let n = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render(f, level + 1, &child_spacer, i + 1 == n)?;
        }
        Ok(())
    }
}

impl<V: fmt::Display> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0, "", true)
    }
}
