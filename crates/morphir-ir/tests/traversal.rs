use morphir_ir::ir::{Literal, Pattern, Type, Value};
use morphir_ir::naming::{FQName, Name};
use morphir_ir::traversal::{
    count_variant, fold_pattern, fold_type, map_type, map_value, match_type, TypeCases, TypeFold,
};
use morphir_ir::TraversalError;

fn variable_counter<'a>() -> TypeFold<'a, (), usize> {
    TypeFold::new()
        .variable(|_, _| 1)
        .reference(|_, _, params: Vec<usize>| params.iter().sum())
        .tuple(|_, elements: Vec<usize>| elements.iter().sum())
        .record(|_, fields| fields.iter().map(|f| f.tpe).sum())
        .extensible_record(|_, _, fields| fields.iter().map(|f| f.tpe).sum())
        .function(|_, arg, res| arg + res)
        .unit(|_| 0)
}

#[test]
fn test_map_units_to_variables() {
    let tpe = Type::function(
        (),
        Type::Unit(()),
        Type::Tuple((), vec![Type::Unit(()), Type::Unit(())]),
    );

    let rewritten = map_type(tpe, |node| match node {
        Type::Unit(a) => Type::Variable(a, Name::from("u")),
        other => other,
    });

    assert_eq!(fold_type(&rewritten, &variable_counter()).unwrap(), 3);
    assert_eq!(count_variant(&rewritten, "TypeVariable"), 3);
    assert_eq!(count_variant(&rewritten, "TypeUnit"), 0);
}

#[test]
fn test_missing_handler_is_an_error() {
    let cases: TypeCases<'_, (), &str> = TypeCases::new().unit(|_| "unit");
    let tpe: Type<()> = Type::variable((), "a");
    let err = match_type(&tpe, &cases).unwrap_err();
    assert!(matches!(err, TraversalError::MissingHandler { variant: "TypeVariable" }));

    let fold: TypeFold<'_, (), usize> = TypeFold::new().unit(|_| 0);
    let nested = Type::Tuple((), vec![Type::Unit(()), Type::variable((), "b")]);
    assert!(matches!(
        fold_type(&nested, &fold),
        Err(TraversalError::MissingFoldHandler { .. })
    ));
}

#[test]
fn test_value_map_rewrites_nested_nodes() {
    let negate = FQName::fqn("Morphir.SDK", "Basics", "negate");
    let value: Value<(), ()> = Value::if_then_else(
        (),
        Value::literal((), true),
        Value::apply((), Value::Reference((), negate.clone()), Value::variable((), "x")),
        Value::Unit(()),
    );

    let rewritten = map_value(value, |node| match node {
        Value::Variable(a, _) => Value::Literal(a, Literal::int(0)),
        other => other,
    });

    assert_eq!(rewritten.collect_references(), vec![negate]);
    assert_eq!(rewritten.count_nodes(), 6);

    let Value::IfThenElse(_, _, then_branch, _) = rewritten else {
        panic!("expected IfThenElse");
    };
    let Value::Apply(_, _, argument) = *then_branch else {
        panic!("expected Apply");
    };
    assert_eq!(*argument, Value::literal((), Literal::int(0)));
}

#[test]
fn test_pattern_fold_collects_bindings() {
    let pattern: Pattern<()> = Pattern::TuplePattern(
        (),
        vec![
            Pattern::AsPattern((), Box::new(Pattern::WildcardPattern(())), Name::from("first")),
            Pattern::HeadTailPattern(
                (),
                Box::new(Pattern::AsPattern(
                    (),
                    Box::new(Pattern::UnitPattern(())),
                    Name::from("head"),
                )),
                Box::new(Pattern::EmptyListPattern(())),
            ),
        ],
    );

    let depth = fold_pattern(&pattern, &|_: &Pattern<()>, children: Vec<usize>| {
        1 + children.into_iter().max().unwrap_or(0)
    });
    assert_eq!(depth, 4);
    assert_eq!(pattern.bound_variables(), vec![Name::from("first"), Name::from("head")]);
}
