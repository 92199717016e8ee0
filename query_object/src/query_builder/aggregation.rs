/// Represents what the statement selects or whether it deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// SELECT operand
    Select,
    /// SELECT count(operand), operand defaults to `*`
    Count,
    /// SELECT sum(operand)
    Sum,
    /// SELECT avg(operand)
    Avg,
    /// SELECT min(operand)
    Min,
    /// SELECT max(operand)
    Max,
    /// DELETE, the operand is ignored
    Delete,
    /// SELECT new map(operand); operand is unescaped caller text
    Map,
}

impl SelectMode {
    /// Leading keyword of the statement
    pub fn keyword(&self) -> &'static str {
        match self {
            SelectMode::Delete => "DELETE",
            _ => "SELECT",
        }
    }

    /// Function name for function-shaped modes
    pub fn function(&self) -> Option<&'static str> {
        match self {
            SelectMode::Count => Some("count"),
            SelectMode::Sum => Some("sum"),
            SelectMode::Avg => Some("avg"),
            SelectMode::Min => Some("min"),
            SelectMode::Max => Some("max"),
            SelectMode::Map => Some("new map"),
            SelectMode::Select | SelectMode::Delete => None,
        }
    }

    /// Whether the operand is wrapped in call parentheses
    pub fn is_function(&self) -> bool {
        self.function().is_some()
    }
}

/// Select mode plus its operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectClause {
    pub mode: SelectMode,
    /// Projected field, entity alias or `*`; `None` means the mode default
    pub operand: Option<String>,
}

impl SelectClause {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            operand: None,
        }
    }

    pub fn with_operand(mode: SelectMode, operand: impl Into<String>) -> Self {
        Self {
            mode,
            operand: Some(operand.into()),
        }
    }

    /// Operand to render, falling back to `*` for count
    pub fn operand(&self) -> &str {
        match (&self.operand, self.mode) {
            (Some(operand), _) => operand,
            (None, SelectMode::Count) => "*",
            (None, _) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mode_keyword() {
        assert_eq!(SelectMode::Select.keyword(), "SELECT");
        assert_eq!(SelectMode::Count.keyword(), "SELECT");
        assert_eq!(SelectMode::Delete.keyword(), "DELETE");
    }

    #[test]
    fn test_function_shaped_modes() {
        assert!(SelectMode::Count.is_function());
        assert!(SelectMode::Avg.is_function());
        assert!(SelectMode::Min.is_function());
        assert!(SelectMode::Max.is_function());
        assert!(SelectMode::Sum.is_function());
        assert!(!SelectMode::Select.is_function());
        assert!(!SelectMode::Delete.is_function());
        assert_eq!(SelectMode::Count.function(), Some("count"));
    }

    #[test]
    fn test_count_operand_defaults_to_star() {
        assert_eq!(SelectClause::new(SelectMode::Count).operand(), "*");
        assert_eq!(
            SelectClause::with_operand(SelectMode::Count, "u.id").operand(),
            "u.id"
        );
        assert_eq!(SelectClause::new(SelectMode::Delete).operand(), "");
    }
}
