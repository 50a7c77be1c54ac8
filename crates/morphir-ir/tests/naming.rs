use morphir_ir::naming::{FQName, Name, Path, QName};
use morphir_ir::ParseError;
use std::str::FromStr;

#[test]
fn test_name_from_mixed_separators() {
    let name = Name::from_str("fooBar_baz 123");
    assert_eq!(name.words(), ["foo", "bar", "baz", "123"]);
    assert_eq!(name.to_title_case(), "FooBarBaz123");
    assert_eq!(name.to_camel_case(), "fooBarBaz123");
    assert_eq!(name.to_snake_case(), "foo_bar_baz_123");
}

#[test]
fn test_name_human_words_collapse_acronyms() {
    let name = Name::from_str("valueInUSD");
    assert_eq!(name.words(), ["value", "in", "u", "s", "d"]);
    assert_eq!(name.to_human_words(), vec!["value", "in", "USD"]);
}

#[test]
fn test_fqname_canonical_string() {
    // Each path is a single name whose words come from the dotted text.
    let fqn = FQName::new(
        Path::new(vec![Name::from_str("Excellent.Package")]),
        Path::new(vec![Name::from_str("Fantastic.Module")]),
        Name::from_str("Amazing Local Name"),
    );
    let rendered = fqn.to_string();
    assert_eq!(rendered, "ExcellentPackage:FantasticModule:amazingLocalName");
    assert_eq!(FQName::from_str(&rendered).unwrap(), fqn);

    let dotted = FQName::fqn("Morphir.SDK", "Basics", "add");
    assert_eq!(dotted.to_string(), "Morphir.SDK:Basics:add");
    assert_eq!(FQName::parse(&dotted.to_string()).unwrap(), dotted);
}

#[test]
fn test_fqname_rejects_wrong_segment_count() {
    let err = FQName::parse("OnlyPackage:Module").unwrap_err();
    assert!(matches!(err, ParseError::InvalidFQName { segments: 2, .. }));
}

#[test]
fn test_qname_canonical_string() {
    let qname = QName::new(Path::from("Morphir.SDK.List"), Name::from_str("foldLeft"));
    let rendered = qname.to_string();
    assert_eq!(rendered, "Morphir.SDK.List:foldLeft");
    assert_eq!(QName::parse(&rendered).unwrap(), qname);
    assert!(QName::parse("NoSeparator").is_err());
}

#[test]
fn test_accessors_do_not_alias() {
    let mut words = vec!["foo".to_string(), "bar".to_string()];
    let name = Name::new(words.clone());
    words.push("baz".to_string());
    assert_eq!(name.words(), ["foo", "bar"]);

    let mut copied = name.words().to_vec();
    copied.clear();
    assert_eq!(name.len(), 2);
}
