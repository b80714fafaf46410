//! Property-based tests for evaluation and the atom codecs

use proptest::prelude::*;

use swrl_builtins::{
    parse_atom, AtomCodec, BuiltinArgument, BuiltinAtom, Evaluator, Relation, TypedLiteral,
};

const DATATYPES: &[&str] = &[
    "http://www.w3.org/2001/XMLSchema#integer",
    "http://www.w3.org/2001/XMLSchema#int",
    "http://www.w3.org/2001/XMLSchema#string",
    "http://example.org/dt#mine",
    "int",
    "float",
];

fn variable_strategy() -> impl Strategy<Value = BuiltinArgument> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,6}")
        .unwrap()
        .prop_map(BuiltinArgument::variable)
}

fn lexical_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,]{0,8}").unwrap()
}

fn literal_strategy() -> impl Strategy<Value = TypedLiteral> {
    prop_oneof![
        lexical_strategy().prop_map(TypedLiteral::plain),
        (
            prop::string::string_regex("-?[0-9]{1,4}").unwrap(),
            prop::sample::select(DATATYPES)
        )
            .prop_map(|(lexical, dt)| TypedLiteral::typed(lexical, dt)),
        (
            lexical_strategy(),
            prop::string::string_regex("[a-z]{2}(-[A-Z]{2})?").unwrap()
        )
            .prop_map(|(lexical, lang)| TypedLiteral::with_language(lexical, lang)),
    ]
}

fn argument_strategy() -> impl Strategy<Value = BuiltinArgument> {
    prop_oneof![
        variable_strategy(),
        literal_strategy().prop_map(BuiltinArgument::Literal),
    ]
}

fn atom_strategy() -> impl Strategy<Value = BuiltinAtom> {
    (
        prop::sample::select(&["mod", "substringAfter", "add", "contains", "stringConcat"][..]),
        prop::collection::vec(argument_strategy(), 0..6),
    )
        .prop_map(|(local, arguments)| {
            BuiltinAtom::new(format!("http://www.w3.org/2003/11/swrlb#{}", local), arguments)
        })
}

proptest! {
    #[test]
    fn xml_round_trip(atom in atom_strategy()) {
        let codec = AtomCodec::default();
        let xml = codec.to_xml(&atom).unwrap();
        prop_assert_eq!(codec.from_xml(&xml).unwrap(), atom);
    }

    #[test]
    fn notation_round_trip(atom in atom_strategy().prop_filter("has arguments", |a| !a.arguments().is_empty())) {
        let text = atom.to_string();
        prop_assert_eq!(parse_atom(&text).unwrap(), atom, "{}", text);
    }

    #[test]
    fn wire_token_round_trip(literal in literal_strategy()) {
        prop_assert_eq!(TypedLiteral::parse(&literal.to_string()), literal);
    }

    #[test]
    fn mod_keeps_exactly_the_satisfying_rows(
        rows in prop::collection::vec((-60i64..60, -1000i64..1000, -50i64..50), 0..40)
    ) {
        let mut table = Relation::new(["?R", "?A", "?B"]).unwrap();
        for (r, a, b) in &rows {
            table
                .push_tokens([format!("{}^^int", r), format!("{}^^int", a), format!("{}^^int", b)])
                .unwrap();
        }
        let atom = BuiltinAtom::modulo(
            BuiltinArgument::variable("R"),
            BuiltinArgument::variable("A"),
            BuiltinArgument::variable("B"),
        );

        let result = Evaluator::new().evaluate(&atom, &table).unwrap();
        let expected: Vec<_> = table
            .rows()
            .iter()
            .zip(&rows)
            .filter(|(_, (r, a, b))| *b != 0 && a % b == *r)
            .map(|(row, _)| row.clone())
            .collect();
        prop_assert_eq!(result.rows(), expected.as_slice());
    }

    #[test]
    fn substring_after_rows_satisfy_the_definition(
        rows in prop::collection::vec(("[ab]{0,3}", "[ab]{0,6}", "[ab]{0,2}"), 0..30)
    ) {
        let mut table = Relation::new(["?R", "?S", "?P"]).unwrap();
        for (r, s, p) in &rows {
            table.push_tokens([r.as_str(), s.as_str(), p.as_str()]).unwrap();
        }
        let atom = BuiltinAtom::substring_after(
            BuiltinArgument::variable("R"),
            BuiltinArgument::variable("S"),
            BuiltinArgument::variable("P"),
        );

        let result = Evaluator::new().evaluate(&atom, &table).unwrap();
        for row in result.rows() {
            let cell = |i: usize| row[i].as_deref().unwrap_or_default();
            let (r, s, p) = (cell(0), cell(1), cell(2));
            let after = if p.is_empty() {
                s
            } else {
                s.find(p).map_or("", |i| &s[i + p.len()..])
            };
            prop_assert_eq!(r, after);
        }
    }
}
