/// Represents the kind of JOIN operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// LEFT JOIN - keeps every row of the left side
    LeftOuter,
    /// RIGHT JOIN - keeps every row of the right side
    RightOuter,
    /// INNER JOIN - keeps matching rows only
    Inner,
    /// FULL JOIN - keeps every row of both sides
    Full,
}

impl JoinType {
    /// Convert JoinType to its keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::LeftOuter => "LEFT JOIN",
            JoinType::RightOuter => "RIGHT JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

/// Operators allowed in a join-time WITH condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithOperator {
    Equal,
    NotEqual,
}

impl WithOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            WithOperator::Equal => "=",
            WithOperator::NotEqual => "!=",
        }
    }
}

/// Extra filter applied while joining (`WITH left op right`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithCondition {
    pub left: String,
    pub operator: WithOperator,
    pub right: String,
}

impl WithCondition {
    pub fn new(left: impl Into<String>, operator: WithOperator, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            operator,
            right: right.into(),
        }
    }

    /// Both operands present and non-blank
    pub fn is_complete(&self) -> bool {
        !self.left.trim().is_empty() && !self.right.trim().is_empty()
    }
}

/// Represents a complete JOIN clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    /// Kind of join (LEFT, INNER, etc.)
    pub join_type: JoinType,
    /// Joined source, usually an association path such as `u.roles`
    pub source: String,
    /// Optional alias for the joined source
    pub alias: Option<String>,
    /// Emit FETCH after the join keyword
    pub fetch: bool,
    /// Optional WITH condition
    pub with: Option<WithCondition>,
}

impl JoinClause {
    /// Create a new JOIN clause
    pub fn new(join_type: JoinType, source: impl Into<String>) -> Self {
        Self {
            join_type,
            source: source.into(),
            alias: None,
            fetch: false,
            with: None,
        }
    }

    /// Add an alias for the joined source
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Fetch the joined association together with its owner
    pub fn fetch(mut self) -> Self {
        self.fetch = true;
        self
    }

    /// Attach a WITH condition
    pub fn with_condition(
        mut self,
        left: impl Into<String>,
        operator: WithOperator,
        right: impl Into<String>,
    ) -> Self {
        self.with = Some(WithCondition::new(left, operator, right));
        self
    }

    /// WITH condition to render; a partially specified one counts as absent
    pub fn effective_with(&self) -> Option<&WithCondition> {
        self.with.as_ref().filter(|with| with.is_complete())
    }

    /// Get the source reference (alias if present, otherwise source name)
    pub fn source_ref(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.source)
    }
}
