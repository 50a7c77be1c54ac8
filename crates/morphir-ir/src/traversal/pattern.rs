//! Fold and map over [`Pattern`] trees.

use crate::ir::pattern::Pattern;
use crate::naming::Name;
use std::convert::Infallible;

/// Post-order reduction: `f` receives each node with the results already
/// computed for its children (in wire order).
pub fn fold_pattern<A, R, F>(pattern: &Pattern<A>, f: &F) -> R
where
    F: Fn(&Pattern<A>, Vec<R>) -> R,
{
    let children = pattern
        .children()
        .into_iter()
        .map(|child| fold_pattern(child, f))
        .collect();
    f(pattern, children)
}

/// Bottom-up rewrite, see [`crate::traversal::types::try_map_type`].
pub fn try_map_pattern<A, E, F>(pattern: Pattern<A>, rewrite: &F) -> Result<Pattern<A>, E>
where
    F: Fn(Pattern<A>) -> Result<Pattern<A>, E>,
{
    let map_all = |items: Vec<Pattern<A>>| -> Result<Vec<Pattern<A>>, E> {
        items
            .into_iter()
            .map(|p| try_map_pattern(p, rewrite))
            .collect()
    };

    let rebuilt = match pattern {
        Pattern::AsPattern(a, subject, name) => {
            Pattern::AsPattern(a, Box::new(try_map_pattern(*subject, rewrite)?), name)
        }
        Pattern::TuplePattern(a, elements) => Pattern::TuplePattern(a, map_all(elements)?),
        Pattern::ConstructorPattern(a, fq, args) => {
            Pattern::ConstructorPattern(a, fq, map_all(args)?)
        }
        Pattern::HeadTailPattern(a, head, tail) => Pattern::HeadTailPattern(
            a,
            Box::new(try_map_pattern(*head, rewrite)?),
            Box::new(try_map_pattern(*tail, rewrite)?),
        ),
        leaf @ (Pattern::WildcardPattern(_)
        | Pattern::EmptyListPattern(_)
        | Pattern::LiteralPattern(..)
        | Pattern::UnitPattern(_)) => leaf,
    };
    rewrite(rebuilt)
}

pub fn map_pattern<A, F>(pattern: Pattern<A>, rewrite: F) -> Pattern<A>
where
    F: Fn(Pattern<A>) -> Pattern<A>,
{
    let rewrite = |node: Pattern<A>| Ok::<_, Infallible>(rewrite(node));
    match try_map_pattern(pattern, &rewrite) {
        Ok(pattern) => pattern,
        Err(never) => match never {},
    }
}

/// Re-parameterize a pattern over new attributes, keeping its shape.
pub fn map_pattern_attributes<A, B, F>(pattern: &Pattern<A>, f: &F) -> Pattern<B>
where
    F: Fn(&A) -> B,
{
    let map_all = |items: &[Pattern<A>]| -> Vec<Pattern<B>> {
        items.iter().map(|p| map_pattern_attributes(p, f)).collect()
    };

    match pattern {
        Pattern::WildcardPattern(a) => Pattern::WildcardPattern(f(a)),
        Pattern::AsPattern(a, subject, name) => Pattern::AsPattern(
            f(a),
            Box::new(map_pattern_attributes(subject, f)),
            name.clone(),
        ),
        Pattern::TuplePattern(a, elements) => Pattern::TuplePattern(f(a), map_all(elements)),
        Pattern::ConstructorPattern(a, fq, args) => {
            Pattern::ConstructorPattern(f(a), fq.clone(), map_all(args))
        }
        Pattern::EmptyListPattern(a) => Pattern::EmptyListPattern(f(a)),
        Pattern::HeadTailPattern(a, head, tail) => Pattern::HeadTailPattern(
            f(a),
            Box::new(map_pattern_attributes(head, f)),
            Box::new(map_pattern_attributes(tail, f)),
        ),
        Pattern::LiteralPattern(a, literal) => Pattern::LiteralPattern(f(a), literal.clone()),
        Pattern::UnitPattern(a) => Pattern::UnitPattern(f(a)),
    }
}

impl<A> Pattern<A> {
    pub fn count_nodes(&self) -> usize {
        fold_pattern(self, &|_, children: Vec<usize>| 1 + children.iter().sum::<usize>())
    }

    /// Names bound by `as` patterns, outermost first.
    pub fn bound_variables(&self) -> Vec<Name> {
        fold_pattern(self, &|node: &Pattern<A>, children: Vec<Vec<Name>>| {
            let mut names = Vec::new();
            if let Pattern::AsPattern(_, _, name) = node {
                names.push(name.clone());
            }
            names.extend(children.into_iter().flatten());
            names
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::literal::Literal;

    fn sample() -> Pattern<u32> {
        // (x :: rest) as all
        Pattern::as_pattern(
            1,
            Pattern::head_tail(
                2,
                Pattern::as_pattern(3, Pattern::WildcardPattern(4), "x"),
                Pattern::as_pattern(5, Pattern::WildcardPattern(6), "rest"),
            ),
            "all",
        )
    }

    #[test]
    fn test_bound_variables() {
        assert_eq!(
            sample().bound_variables(),
            vec![Name::from("all"), Name::from("x"), Name::from("rest")]
        );
        assert_eq!(sample().count_nodes(), 6);
    }

    #[test]
    fn test_map_pattern_rewrites_wildcards() {
        let mapped = map_pattern(sample(), |p| match p {
            Pattern::WildcardPattern(a) => Pattern::LiteralPattern(a, Literal::int(0)),
            other => other,
        });
        let literals = fold_pattern(&mapped, &|node, children: Vec<usize>| {
            let own = usize::from(matches!(node, Pattern::LiteralPattern(..)));
            own + children.iter().sum::<usize>()
        });
        assert_eq!(literals, 2);
    }

    #[test]
    fn test_map_pattern_attributes() {
        let mapped = map_pattern_attributes(&sample(), &|a: &u32| a * 10);
        assert_eq!(*mapped.attributes(), 10);
        let attrs = fold_pattern(&mapped, &|node: &Pattern<u32>, children: Vec<Vec<u32>>| {
            let mut all = vec![*node.attributes()];
            all.extend(children.into_iter().flatten());
            all
        });
        assert_eq!(attrs, vec![10, 20, 30, 40, 50, 60]);
    }
}
