//! Clause operators.
//!
//! The [`Op`] enum is the closed set of operator suffixes recognized at the
//! end of a clause name (`born__year__ge`). A final segment that is not one
//! of these is treated as an attribute name and the clause tests equality.

use std::cmp::Ordering;

/// Comparison operator for a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal. Implied when a clause has no operator suffix.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Containment: the attribute (string or list) contains the operand.
    In,
    /// Regex search anywhere in the attribute string.
    Match,
    /// Case-insensitive regex search.
    IMatch,
    /// Inclusive range between two operand bounds.
    Between,
}

impl Op {
    /// All operators recognized as clause suffixes.
    pub const SUFFIXES: [Op; 9] = [
        Op::Gt,
        Op::Ge,
        Op::Lt,
        Op::Le,
        Op::Ne,
        Op::In,
        Op::Match,
        Op::IMatch,
        Op::Between,
    ];

    /// Parses a clause suffix. `eq` is not a suffix; equality has none.
    pub fn from_suffix(suffix: &str) -> Option<Op> {
        Op::SUFFIXES.into_iter().find(|op| op.as_str() == suffix)
    }

    /// Evaluates `gt`, `ge`, `lt` or `le` given the attribute-vs-operand
    /// ordering. Every other operator evaluates false.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the suffix spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Ge => "ge",
            Op::Lt => "lt",
            Op::Le => "le",
            Op::In => "in",
            Op::Match => "match",
            Op::IMatch => "imatch",
            Op::Between => "between",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_parsing() {
        assert_eq!(Op::from_suffix("ge"), Some(Op::Ge));
        assert_eq!(Op::from_suffix("imatch"), Some(Op::IMatch));
        assert_eq!(Op::from_suffix("between"), Some(Op::Between));
        assert_eq!(Op::from_suffix("in"), Some(Op::In));

        // Not operators: treated as attribute names
        assert_eq!(Op::from_suffix("eq"), None);
        assert_eq!(Op::from_suffix("year"), None);
        assert_eq!(Op::from_suffix("gte"), None);
        assert_eq!(Op::from_suffix("GT"), None);
    }

    #[test]
    fn suffixes_round_trip() {
        for op in Op::SUFFIXES {
            assert_eq!(Op::from_suffix(op.as_str()), Some(op));
        }
    }

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));

        assert!(Op::Ge.eval_ordering(Ordering::Equal));
        assert!(!Op::Ge.eval_ordering(Ordering::Less));

        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(!Op::Lt.eval_ordering(Ordering::Equal));

        assert!(Op::Le.eval_ordering(Ordering::Equal));
        assert!(!Op::Le.eval_ordering(Ordering::Greater));

        assert!(!Op::Match.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Ge.to_string(), "ge");
        assert_eq!(Op::IMatch.to_string(), "imatch");
    }
}
