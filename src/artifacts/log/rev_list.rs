use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::{HashSet, VecDeque};

/// History reachable from one commit
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: Option<ObjectId>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = &'r Commit;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        let queue = self.start.iter().cloned().collect::<VecDeque<_>>();
        let visited = queue.iter().cloned().collect::<HashSet<_>>();

        RevListIntoIter {
            database: self.database,
            queue,
            visited,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> Iterator for RevListIntoIter<'r> {
    type Item = &'r Commit;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.queue.pop_front() {
            // unknown ids are skipped rather than ending the walk
            let Some(commit) = self.database.load(&oid) else {
                continue;
            };

            for parent in commit.parents() {
                if self.visited.insert(parent.clone()) {
                    self.queue.push_back(parent.clone());
                }
            }

            return Some(commit);
        }

        None
    }
}
