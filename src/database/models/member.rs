use serde::Serialize;

use crate::database::types::MemberRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    team_id: Option<i64>,
}

impl Member {
    pub(super) fn new(id: i64, username: Option<String>, age: i32) -> Self {
        Self {
            id,
            username,
            age,
            team_id: None,
        }
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    // Only Roster calls this, after updating the team side.
    pub(super) fn set_team(&mut self, team_id: Option<i64>) {
        self.team_id = team_id;
    }
}

// The team side is wired up by Roster::from_rows.
impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self::new(row.id, row.username, row.age)
    }
}
