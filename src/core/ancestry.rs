//! Commit graph traversal.
//!
//! Two walks are used by the simulator and they deliberately differ:
//! - [`FirstParentWalk`] follows only `parents[0]`. `log` and fast-forward detection
//!   use it, matching `git log --first-parent`.
//! - [`is_ancestor`] follows every parent breadth-first, so history reachable only
//!   through the second parent of a merge still counts.
//!
//! [`find_cycle`] checks that a loaded graph is acyclic before it goes live.

use crate::core::state::{Commit, CommitHash};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Iterator over a commit and its first-parent ancestors, newest first.
///
/// Stops at a root commit or at the first hash that has no recorded commit.
pub struct FirstParentWalk<'a> {
    commits: &'a BTreeMap<CommitHash, Commit>,
    next: Option<&'a str>,
    seen: HashSet<&'a str>,
}

impl<'a> FirstParentWalk<'a> {
    pub fn new(commits: &'a BTreeMap<CommitHash, Commit>, start: Option<&'a str>) -> Self {
        Self {
            commits,
            next: start,
            seen: HashSet::new(),
        }
    }
}

impl<'a> Iterator for FirstParentWalk<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let hash = self.next.take()?;
        // Graphs loaded from scenarios are validated, but never loop forever
        if !self.seen.insert(hash) {
            return None;
        }
        let commit = self.commits.get(hash)?;
        self.next = commit.first_parent();
        Some(commit)
    }
}

/// Returns true iff `ancestor_hash` is reachable from `descendant_hash` through any
/// chain of parents. A commit counts as its own ancestor.
pub fn is_ancestor(
    commits: &BTreeMap<CommitHash, Commit>,
    ancestor_hash: &str,
    descendant_hash: &str,
) -> bool {
    let mut queue: VecDeque<&Commit> = commits.get(descendant_hash).into_iter().collect();
    let mut visited: HashSet<&str> = HashSet::new();

    while let Some(commit) = queue.pop_front() {
        if !visited.insert(commit.hash.as_str()) {
            continue;
        }
        if commit.hash == ancestor_hash {
            return true;
        }
        queue.extend(
            commit
                .parents
                .iter()
                .filter_map(|parent| commits.get(parent)),
        );
    }

    false
}

/// Whether `target_hash` lies on the first-parent chain starting at `start_hash`
pub fn on_first_parent_chain(
    commits: &BTreeMap<CommitHash, Commit>,
    start_hash: &str,
    target_hash: &str,
) -> bool {
    FirstParentWalk::new(commits, Some(start_hash)).any(|commit| commit.hash == target_hash)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// A commit that lies on a parent cycle, or `None` when the graph is acyclic.
///
/// Depth-first over `parents` with visiting/done marks. Parents with no recorded
/// commit are skipped.
pub fn find_cycle(commits: &BTreeMap<CommitHash, Commit>) -> Option<&str> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();

    for root in commits.keys() {
        if marks.contains_key(root.as_str()) {
            continue;
        }
        marks.insert(root.as_str(), Mark::Visiting);
        let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];

        while let Some(&(hash, next)) = stack.last() {
            let parents = commits.get(hash).map_or(&[][..], |c| c.parents.as_slice());
            let Some(parent) = parents.get(next) else {
                marks.insert(hash, Mark::Done);
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }

            let Some((parent, _)) = commits.get_key_value(parent) else {
                continue;
            };
            match marks.get(parent.as_str()) {
                Some(Mark::Visiting) => return Some(parent.as_str()),
                Some(Mark::Done) => {}
                None => {
                    marks.insert(parent.as_str(), Mark::Visiting);
                    stack.push((parent.as_str(), 0));
                }
            }
        }
    }

    None
}
