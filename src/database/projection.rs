use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, sqlite::SqliteRow};

use crate::error::AppError;

/// A column of the member/team projection.
///
/// Each column knows the SQL expression it is read from (`m` is `members`,
/// `t` is `teams`) and the alias it is projected under, so the select list,
/// the predicates and the ordering all name columns the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::MemberId,
        Column::Username,
        Column::Age,
        Column::TeamId,
        Column::TeamName,
    ];

    pub const fn qualified(self) -> &'static str {
        match self {
            Column::MemberId => "m.id",
            Column::Username => "m.username",
            Column::Age => "m.age",
            Column::TeamId => "t.id",
            Column::TeamName => "t.name",
        }
    }

    pub const fn alias(self) -> &'static str {
        match self {
            Column::MemberId => "member_id",
            Column::Username => "username",
            Column::Age => "age",
            Column::TeamId => "team_id",
            Column::TeamName => "team_name",
        }
    }

    pub const fn field_name(self) -> &'static str {
        match self {
            Column::MemberId => "memberId",
            Column::Username => "username",
            Column::Age => "age",
            Column::TeamId => "teamId",
            Column::TeamName => "teamName",
        }
    }

    /// `m.id AS member_id, m.username AS username, ...`
    pub fn select_list() -> String {
        Column::ALL
            .iter()
            .map(|column| format!("{} AS {}", column.qualified(), column.alias()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Column {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::bad_request(format!("Unknown sort field: {}", s)))
    }
}

/// One search result: a member flattened together with its team, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for MemberTeamDto {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let team_id: Option<i64> = row.try_get(Column::TeamId.alias())?;
        let team_name: Option<String> = row.try_get(Column::TeamName.alias())?;

        Ok(Self {
            member_id: row.try_get(Column::MemberId.alias())?,
            username: row.try_get(Column::Username.alias())?,
            age: row.try_get(Column::Age.alias())?,
            // A teamless member comes back with every team column null.
            team_id,
            team_name: team_id.and(team_name),
        })
    }
}
