use std::fmt;

use sqlx::{QueryBuilder, Sqlite};

use crate::database::{models::MemberSearchCondition, projection::Column};

/// A value compared against a column. Always sent as a bound parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Text(String),
    Integer(i64),
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A single filter over one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// column = operand
    Eq(Column, Operand),
    /// column >= operand
    Goe(Column, Operand),
    /// column <= operand
    Loe(Column, Operand),
}

impl Predicate {
    pub fn eq(column: Column, operand: impl Into<Operand>) -> Self {
        Self::Eq(column, operand.into())
    }

    pub fn goe(column: Column, operand: impl Into<Operand>) -> Self {
        Self::Goe(column, operand.into())
    }

    pub fn loe(column: Column, operand: impl Into<Operand>) -> Self {
        Self::Loe(column, operand.into())
    }

    pub fn column(&self) -> Column {
        match self {
            Self::Eq(column, _) | Self::Goe(column, _) | Self::Loe(column, _) => *column,
        }
    }

    pub fn operand(&self) -> &Operand {
        match self {
            Self::Eq(_, operand) | Self::Goe(_, operand) | Self::Loe(_, operand) => operand,
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            Self::Eq(..) => "=",
            Self::Goe(..) => ">=",
            Self::Loe(..) => "<=",
        }
    }

    /// Append `<column> <op> ?` to the builder, binding the operand.
    pub fn push_to(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder
            .push(self.column().qualified())
            .push(" ")
            .push(self.operator())
            .push(" ");

        match self.operand() {
            Operand::Text(s) => builder.push_bind(s.clone()),
            Operand::Integer(n) => builder.push_bind(*n),
        };
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column().qualified(),
            self.operator(),
            self.operand()
        )
    }
}

impl MemberSearchCondition {
    /// The predicates for every populated field, in field order.
    ///
    /// Unset fields are left out entirely rather than replaced by a
    /// tautology, so an empty condition yields an empty list.
    pub fn predicates(&self) -> Vec<Predicate> {
        [
            has_text(self.username.as_deref()).map(|u| Predicate::eq(Column::Username, u)),
            has_text(self.team_name.as_deref()).map(|t| Predicate::eq(Column::TeamName, t)),
            self.age_goe.map(|age| Predicate::goe(Column::Age, age)),
            self.age_loe.map(|age| Predicate::loe(Column::Age, age)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// `Some` only when the value has at least one non-whitespace character.
fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
