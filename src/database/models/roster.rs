use std::collections::BTreeMap;

use crate::database::types::{MemberRow, TeamRow};
use crate::error::AppError;

use super::{Member, Team};

/// Owning aggregate for teams and members.
///
/// Every team assignment goes through [`Roster::change_team`] or
/// [`Roster::leave_team`], so a member's `team_id` and the team's member
/// collection can never disagree.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: BTreeMap<i64, Team>,
    members: BTreeMap<i64, Member>,
    next_team_id: i64,
    next_member_id: i64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from stored rows, re-deriving every back-reference.
    pub fn from_rows(teams: Vec<TeamRow>, members: Vec<MemberRow>) -> Result<Self, AppError> {
        let mut roster = Roster::new();

        for row in teams {
            roster.next_team_id = roster.next_team_id.max(row.id);
            roster.teams.insert(row.id, Team::from(row));
        }

        for row in members {
            let member_id = row.id;
            let team_id = row.team_id;
            roster.next_member_id = roster.next_member_id.max(member_id);
            roster.members.insert(member_id, Member::from(row));

            if let Some(team_id) = team_id {
                roster.change_team(member_id, team_id).map_err(|_| {
                    AppError::internal_server_error_message(format!(
                        "member {} references missing team {}",
                        member_id, team_id
                    ))
                })?;
            }
        }

        Ok(roster)
    }

    pub fn add_team(&mut self, name: impl Into<String>) -> i64 {
        self.next_team_id += 1;
        let id = self.next_team_id;
        self.teams.insert(id, Team::new(id, name.into()));
        id
    }

    /// Add a member, optionally assigning it to an existing team.
    pub fn add_member(
        &mut self,
        username: Option<String>,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<i64, AppError> {
        if let Some(team_id) = team_id {
            self.ensure_team(team_id)?;
        }

        self.next_member_id += 1;
        let id = self.next_member_id;
        self.members.insert(id, Member::new(id, username, age));

        if let Some(team_id) = team_id {
            self.change_team(id, team_id)?;
        }

        Ok(id)
    }

    /// Move a member into `team_id`, leaving its previous team if any.
    pub fn change_team(&mut self, member_id: i64, team_id: i64) -> Result<(), AppError> {
        self.ensure_team(team_id)?;
        let previous = self.member(member_id)?.team_id();

        if let Some(previous) = previous {
            if let Some(team) = self.teams.get_mut(&previous) {
                team.unregister(member_id);
            }
        }

        if let Some(team) = self.teams.get_mut(&team_id) {
            team.register(member_id);
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.set_team(Some(team_id));
        }

        Ok(())
    }

    pub fn leave_team(&mut self, member_id: i64) -> Result<(), AppError> {
        let previous = self.member(member_id)?.team_id();

        if let Some(previous) = previous {
            if let Some(team) = self.teams.get_mut(&previous) {
                team.unregister(member_id);
            }
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.set_team(None);
        }

        Ok(())
    }

    pub fn team(&self, team_id: i64) -> Result<&Team, AppError> {
        self.teams
            .get(&team_id)
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))
    }

    pub fn member(&self, member_id: i64) -> Result<&Member, AppError> {
        self.members
            .get(&member_id)
            .ok_or_else(|| AppError::NotFound(format!("member {}", member_id)))
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    fn ensure_team(&self, team_id: i64) -> Result<(), AppError> {
        self.team(team_id).map(|_| ())
    }
}
