/// Raw GROUP BY and HAVING text, emitted after ORDER BY
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// GROUP BY expression
    pub group_by: Option<String>,
    /// HAVING expression, caller-trusted text
    pub having: Option<String>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GROUP BY expression, replacing any previous one
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    /// Set the HAVING expression, replacing any previous one
    pub fn having(mut self, expression: impl Into<String>) -> Self {
        self.having = Some(expression.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.group_by.is_none() && self.having.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_new_is_empty() {
        let grouping = Grouping::new();
        assert!(grouping.is_empty());
        assert_eq!(grouping.group_by, None);
        assert_eq!(grouping.having, None);
    }

    #[test]
    fn test_grouping_chain() {
        let grouping = Grouping::new()
            .group_by("u.country")
            .having("count(u.id) > 5");

        assert!(!grouping.is_empty());
        assert_eq!(grouping.group_by.as_deref(), Some("u.country"));
        assert_eq!(grouping.having.as_deref(), Some("count(u.id) > 5"));
    }

    #[test]
    fn test_grouping_last_call_wins() {
        let grouping = Grouping::new().group_by("a").group_by("b");
        assert_eq!(grouping.group_by.as_deref(), Some("b"));
    }
}
