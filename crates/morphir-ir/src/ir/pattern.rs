//! Patterns used by lambdas, destructuring and pattern matches.

use super::literal::Literal;
use crate::naming::{FQName, Name};

/// Pattern with generic attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern<A> {
    /// `_`
    WildcardPattern(A),
    /// `subject as name`
    AsPattern(A, Box<Pattern<A>>, Name),
    TuplePattern(A, Vec<Pattern<A>>),
    ConstructorPattern(A, FQName, Vec<Pattern<A>>),
    /// `[]`
    EmptyListPattern(A),
    /// `head :: tail`
    HeadTailPattern(A, Box<Pattern<A>>, Box<Pattern<A>>),
    LiteralPattern(A, Literal),
    /// `()`
    UnitPattern(A),
}

impl<A> Pattern<A> {
    pub fn as_pattern(attrs: A, subject: Pattern<A>, name: impl Into<Name>) -> Self {
        Pattern::AsPattern(attrs, Box::new(subject), name.into())
    }

    pub fn head_tail(attrs: A, head: Pattern<A>, tail: Pattern<A>) -> Self {
        Pattern::HeadTailPattern(attrs, Box::new(head), Box::new(tail))
    }

    pub fn attributes(&self) -> &A {
        match self {
            Pattern::WildcardPattern(a)
            | Pattern::AsPattern(a, _, _)
            | Pattern::TuplePattern(a, _)
            | Pattern::ConstructorPattern(a, _, _)
            | Pattern::EmptyListPattern(a)
            | Pattern::HeadTailPattern(a, _, _)
            | Pattern::LiteralPattern(a, _)
            | Pattern::UnitPattern(a) => a,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::WildcardPattern(_) => "WildcardPattern",
            Pattern::AsPattern(..) => "AsPattern",
            Pattern::TuplePattern(..) => "TuplePattern",
            Pattern::ConstructorPattern(..) => "ConstructorPattern",
            Pattern::EmptyListPattern(_) => "EmptyListPattern",
            Pattern::HeadTailPattern(..) => "HeadTailPattern",
            Pattern::LiteralPattern(..) => "LiteralPattern",
            Pattern::UnitPattern(_) => "UnitPattern",
        }
    }

    /// Direct sub-patterns, in wire order.
    pub fn children(&self) -> Vec<&Pattern<A>> {
        match self {
            Pattern::AsPattern(_, subject, _) => vec![subject.as_ref()],
            Pattern::TuplePattern(_, elements) | Pattern::ConstructorPattern(_, _, elements) => {
                elements.iter().collect()
            }
            Pattern::HeadTailPattern(_, head, tail) => vec![head.as_ref(), tail.as_ref()],
            Pattern::WildcardPattern(_)
            | Pattern::EmptyListPattern(_)
            | Pattern::LiteralPattern(..)
            | Pattern::UnitPattern(_) => Vec::new(),
        }
    }

    /// Deep structural equality with a caller-supplied attribute comparison.
    pub fn equal_by<F>(&self, other: &Pattern<A>, eq_attrs: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        match (self, other) {
            (Pattern::WildcardPattern(a1), Pattern::WildcardPattern(a2))
            | (Pattern::EmptyListPattern(a1), Pattern::EmptyListPattern(a2))
            | (Pattern::UnitPattern(a1), Pattern::UnitPattern(a2)) => eq_attrs(a1, a2),
            (Pattern::AsPattern(a1, s1, n1), Pattern::AsPattern(a2, s2, n2)) => {
                eq_attrs(a1, a2) && s1.equal_by(s2, eq_attrs) && n1 == n2
            }
            (Pattern::TuplePattern(a1, e1), Pattern::TuplePattern(a2, e2)) => {
                eq_attrs(a1, a2) && patterns_equal_by(e1, e2, eq_attrs)
            }
            (
                Pattern::ConstructorPattern(a1, fq1, e1),
                Pattern::ConstructorPattern(a2, fq2, e2),
            ) => {
                eq_attrs(a1, a2) && fq1 == fq2 && patterns_equal_by(e1, e2, eq_attrs)
            }
            (Pattern::HeadTailPattern(a1, h1, t1), Pattern::HeadTailPattern(a2, h2, t2)) => {
                eq_attrs(a1, a2) && h1.equal_by(h2, eq_attrs) && t1.equal_by(t2, eq_attrs)
            }
            (Pattern::LiteralPattern(a1, l1), Pattern::LiteralPattern(a2, l2)) => {
                eq_attrs(a1, a2) && l1 == l2
            }
            _ => false,
        }
    }
}

fn patterns_equal_by<A, F>(left: &[Pattern<A>], right: &[Pattern<A>], eq_attrs: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.equal_by(r, eq_attrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_order() {
        let p = Pattern::head_tail(
            (),
            Pattern::LiteralPattern((), Literal::int(1)),
            Pattern::EmptyListPattern(()),
        );
        let kinds: Vec<_> = p.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, ["LiteralPattern", "EmptyListPattern"]);
    }

    #[test]
    fn test_equal_by() {
        let left = Pattern::as_pattern(1, Pattern::WildcardPattern(2), "x");
        let right = Pattern::as_pattern(1, Pattern::WildcardPattern(3), "x");
        assert!(left.equal_by(&right, &|_, _| true));
        assert!(!left.equal_by(&right, &|a, b| a == b));
        assert!(!left.equal_by(&Pattern::WildcardPattern(1), &|_, _| true));
    }
}
