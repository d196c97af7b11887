use std::collections::BTreeSet;

use serde::Serialize;

use crate::database::types::TeamRow;

/// A team and the ids of the members registered to it.
///
/// The member collection is a back-reference only: it is maintained by
/// [`Roster`](super::Roster) whenever a member's team changes and never
/// edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    member_ids: BTreeSet<i64>,
}

impl Team {
    pub(super) fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            member_ids: BTreeSet::new(),
        }
    }

    pub fn member_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.member_ids.iter().copied()
    }

    pub fn has_member(&self, member_id: i64) -> bool {
        self.member_ids.contains(&member_id)
    }

    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    pub(super) fn register(&mut self, member_id: i64) {
        self.member_ids.insert(member_id);
    }

    pub(super) fn unregister(&mut self, member_id: i64) {
        self.member_ids.remove(&member_id);
    }
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self::new(row.id, row.name)
    }
}
