//! Read-only graph view over a flat topic collection.
//!
//! [`TopicGraph`] indexes a `&[Topic]` slice by id and by parent id. Links
//! are resolved through the index, never through owning pointers, so a
//! dangling `parent_topic_id` simply resolves to nothing.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::topic::{Topic, TopicPath, TopicTree, MAX_TREE_DEPTH};

pub struct TopicGraph<'a> {
    topics: &'a [Topic],
    by_id: HashMap<&'a str, usize>,
    /// Parent id -> child indices, in collection order.
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TopicGraph<'a> {
    pub fn new(topics: &'a [Topic]) -> Self {
        let mut by_id = HashMap::with_capacity(topics.len());
        let mut children: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, topic) in topics.iter().enumerate() {
            by_id.entry(topic.id.as_str()).or_insert(idx);
            if let Some(parent) = topic.parent_topic_id.as_deref() {
                children.entry(parent).or_default().push(idx);
            }
        }
        Self {
            topics,
            by_id,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Topic> {
        self.by_id.get(id).map(|&idx| &self.topics[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Direct children of `id`, in collection order.
    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &'a Topic> + '_ {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.topics[idx])
    }

    /// Whether making `new_parent` the parent of `topic_id` would close a
    /// loop.
    ///
    /// Walks parent pointers upward from `new_parent`. Reaching `topic_id`
    /// is a cycle; a missing parent ends the walk. Revisiting a node means
    /// the stored data already loops, which also counts as a cycle.
    pub fn would_create_cycle(&self, topic_id: &str, new_parent: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cursor = Some(new_parent);
        while let Some(current) = cursor {
            if current == topic_id || !seen.insert(current) {
                return true;
            }
            cursor = self
                .get(current)
                .and_then(|t| t.parent_topic_id.as_deref());
        }
        false
    }

    /// The subtree rooted at `root_id`, or `None` if it is not in the graph.
    ///
    /// A node reachable twice (only possible with corrupted parent links)
    /// is emitted once. Nodes at [`MAX_TREE_DEPTH`] keep no children and
    /// are marked `truncated` if they had any.
    pub fn build_tree(&self, root_id: &str) -> Option<TopicTree> {
        let root = *self.by_id.get(root_id)?;

        // Preorder walk: (topic index, parent slot, truncated).
        let mut order: Vec<(usize, Option<usize>, bool)> = Vec::new();
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 1)];
        while let Some((idx, parent, level)) = stack.pop() {
            let topic = &self.topics[idx];
            if !seen.insert(topic.id.as_str()) {
                continue;
            }
            let slot = order.len();
            let children = self.children.get(topic.id.as_str());
            if level >= MAX_TREE_DEPTH {
                let cut = children.is_some_and(|c| !c.is_empty());
                order.push((idx, parent, cut));
                continue;
            }
            order.push((idx, parent, false));
            for &child in children.into_iter().flatten().rev() {
                stack.push((child, Some(slot), level + 1));
            }
        }

        // Assemble bottom-up; every child slot comes after its parent.
        let mut built: Vec<Vec<TopicTree>> = vec![Vec::new(); order.len()];
        let mut tree = None;
        for (slot, &(idx, parent, truncated)) in order.iter().enumerate().rev() {
            let mut children = std::mem::take(&mut built[slot]);
            children.reverse();
            let node = TopicTree {
                topic: self.topics[idx].clone(),
                children,
                truncated,
            };
            match parent {
                Some(p) => built[p].push(node),
                None => tree = Some(node),
            }
        }
        tree
    }

    /// Fewest-edges path between two topics, treating parent links as
    /// undirected edges.
    ///
    /// Neighbours are explored parent first, then children in collection
    /// order, so ties resolve deterministically.
    pub fn shortest_path(&self, start_id: &str, end_id: &str) -> TopicPath {
        let (Some(start), Some(end)) = (self.get(start_id), self.get(end_id)) else {
            return TopicPath::not_found(start_id, end_id);
        };
        if start.id == end.id {
            return TopicPath::from_hops(start_id, end_id, &[start]);
        }

        let mut came_from: HashMap<&'a str, &'a str> = HashMap::new();
        let mut seen: HashSet<&'a str> = HashSet::from([start.id.as_str()]);
        let mut queue: VecDeque<&'a Topic> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let parent = current
                .parent_topic_id
                .as_deref()
                .and_then(|p| self.get(p));
            for next in parent.into_iter().chain(self.children_of(&current.id)) {
                if !seen.insert(next.id.as_str()) {
                    continue;
                }
                came_from.insert(next.id.as_str(), current.id.as_str());
                if next.id == end.id {
                    return TopicPath::from_hops(start_id, end_id, &self.walk_back(&came_from, next));
                }
                queue.push_back(next);
            }
        }

        TopicPath::not_found(start_id, end_id)
    }

    fn walk_back(&self, came_from: &HashMap<&'a str, &'a str>, end: &'a Topic) -> Vec<&'a Topic> {
        let mut hops = vec![end];
        let mut cursor = end.id.as_str();
        while let Some(&prev) = came_from.get(cursor) {
            if let Some(topic) = self.get(prev) {
                hops.push(topic);
            }
            cursor = prev;
        }
        hops.reverse();
        hops
    }
}
