use sqlx::{QueryBuilder, Sqlite};

use crate::database::{
    models::MemberSearchCondition,
    pagination::{PageRequest, Sort},
    predicate::Predicate,
    projection::Column,
};

// Left outer join: members without a team must survive every filter that
// does not itself constrain the team.
const FROM_MEMBERS_JOIN_TEAMS: &str = " FROM members m LEFT OUTER JOIN teams t ON m.team_id = t.id";

/// The member/team search, assembled from a condition and an optional page.
///
/// The same predicates feed both the content query and the count query, so
/// the two always agree on the filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamQuery {
    predicates: Vec<Predicate>,
    sort: Vec<Sort>,
    window: Option<(i64, i64)>,
}

impl MemberTeamQuery {
    pub fn new(condition: &MemberSearchCondition) -> Self {
        Self {
            predicates: condition.predicates(),
            sort: Vec::new(),
            window: None,
        }
    }

    /// Bound the content query to the page window and apply its sort.
    pub fn paged(mut self, page: &PageRequest) -> Self {
        self.sort = page.sort.clone();
        self.window = Some((page.offset, page.limit));
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> &[Sort] {
        &self.sort
    }

    /// `SELECT <projection> FROM ... [WHERE ...] [ORDER BY ...] [LIMIT ? OFFSET ?]`
    pub fn content_sql(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(Column::select_list());
        builder.push(FROM_MEMBERS_JOIN_TEAMS);
        self.push_where(&mut builder);

        if !self.sort.is_empty() {
            builder.push(" ORDER BY ");
            let mut separated = builder.separated(", ");
            for sort in &self.sort {
                separated.push(format!(
                    "{} {}",
                    sort.column.alias(),
                    sort.direction.sql()
                ));
            }
        }

        if let Some((offset, limit)) = self.window {
            builder.push(" LIMIT ").push_bind(limit);
            builder.push(" OFFSET ").push_bind(offset);
        }

        builder
    }

    /// `SELECT COUNT(m.id) FROM ... [WHERE ...]`, ignoring sort and window.
    pub fn count_sql(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new("SELECT COUNT(");
        builder.push(Column::MemberId.qualified()).push(")");
        builder.push(FROM_MEMBERS_JOIN_TEAMS);
        self.push_where(&mut builder);
        builder
    }

    fn push_where(&self, builder: &mut QueryBuilder<'static, Sqlite>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(builder);
        }
    }
}
