use rstest::rstest;
use sexp::{
    from_reader, parse, parse_all, read, to_text, Outcome, ParseError, ReadError, Sexp, TokenKind,
    Tokenizer,
};

fn symbol(name: &str) -> Sexp {
    Sexp::symbol(name).unwrap()
}

fn number(text: &str) -> Sexp {
    Sexp::number(text).unwrap()
}

fn string(value: &str) -> Sexp {
    Sexp::string(value)
}

fn list<const N: usize>(children: [Sexp; N]) -> Sexp {
    Sexp::list(children)
}

fn i32_const(value: &str) -> Sexp {
    list([symbol("i32.const"), number(value)])
}

#[rstest]
#[case("()", Sexp::List(vec![]))]
#[case("(a)", list([symbol("a")]))]
#[case("(a b c)", list([symbol("a"), symbol("b"), symbol("c")]))]
#[case("(a (b c))", list([symbol("a"), list([symbol("b"), symbol("c")])]))]
#[case(
    r#"(assert_return (invoke "add" (i32.const 1) (i32.const 1)) (i32.const 2))"#,
    list([
        symbol("assert_return"),
        list([symbol("invoke"), string("add"), i32_const("1"), i32_const("1")]),
        i32_const("2"),
    ])
)]
#[case(
    r#"(assert_trap (invoke "div_s" (i32.const 1) (i32.const 0)) "integer divide by zero")"#,
    list([
        symbol("assert_trap"),
        list([symbol("invoke"), string("div_s"), i32_const("1"), i32_const("0")]),
        string("integer divide by zero"),
    ])
)]
fn parse_wast(#[case] text: &str, #[case] expected: Sexp) {
    assert_eq!(Some(expected), parse(text).unwrap());
}

#[rstest]
#[case("()")]
#[case("(a (b c))")]
#[case(r#"(assert_return (invoke "add" (i32.const 1) (i32.const 1)) (i32.const 2))"#)]
#[case(r#"(data "he said \"hello\"" "\\")"#)]
#[case("(f32.const -1.5e-3 6.023e23 nan:0x200000)")]
fn canonical_text_is_stable(#[case] text: &str) {
    let sexp = parse(text).unwrap().unwrap();
    assert_eq!(text, to_text(&sexp));
    assert_eq!(Some(sexp.clone()), parse(&to_text(&sexp)).unwrap());
}

#[test]
fn layout_is_not_part_of_the_tree() {
    let compact = parse("(module (func (result i32) (i32.const 42)))").unwrap();
    let spread = parse("(module\n  (func\n    (result i32)\n    (i32.const 42)\n  )\n)\n").unwrap();
    assert_eq!(compact, spread);
}

#[test]
fn token_count_of_wast_assertion() {
    let text = r#"(assert_return (invoke "add" (i32.const 1) (i32.const 1)) (i32.const 2))"#;
    let kinds: Vec<_> = Tokenizer::new(text).map(|token| token.kind()).collect();

    assert_eq!(19, kinds.len());
    assert_eq!(
        [
            TokenKind::OpenParen,
            TokenKind::Symbol,
            TokenKind::OpenParen,
            TokenKind::Symbol,
            TokenKind::String
        ],
        kinds[..5]
    );
    assert_eq!([TokenKind::CloseParen, TokenKind::CloseParen], kinds[17..]);
}

#[test]
fn string_values() {
    let sexp = parse(r#"(assert_trap (invoke "div_s") "integer \"divide\" by zero")"#)
        .unwrap()
        .unwrap();
    let message = sexp.as_list().unwrap()[2].as_atom().unwrap();
    assert_eq!(r#""integer \"divide\" by zero""#, message.text());
    assert_eq!(
        Some(r#"integer "divide" by zero"#.to_string()),
        message.unescaped()
    );
}

#[rstest]
#[case("", Outcome::Empty)]
#[case("(module (func", Outcome::Incomplete)]
#[case(r#"(data "unterminated)"#, Outcome::Incomplete)]
fn absent_results(#[case] text: &str, #[case] expected: Outcome) {
    assert_eq!(expected, read(text).unwrap());
}

#[test]
fn stray_close_is_an_error() {
    let err = parse(") (module)").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unexpected {
            found: TokenKind::CloseParen,
            ..
        }
    ));
}

#[test]
fn script() {
    let script = r#"
        (module
          (func (export "add") (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.add))

        (assert_return (invoke "add" (i32.const 1) (i32.const 1)) (i32.const 2))
        (assert_return (invoke "add" (i32.const -1) (i32.const 1)) (i32.const 0))
    "#;

    let forms = parse_all(script).unwrap();
    let heads: Vec<_> = forms.iter().filter_map(Sexp::head_symbol).collect();
    assert_eq!(vec!["module", "assert_return", "assert_return"], heads);
}

#[test]
fn reader() {
    let input = "(module (memory 1))\n".as_bytes();
    let sexp = from_reader(input).unwrap().unwrap();
    assert_eq!("(module (memory 1))", to_text(&sexp));
}

#[test]
fn reader_with_invalid_utf8() {
    let input: &[u8] = b"(module \xff)";
    let err = from_reader(input).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Read(ReadError::InvalidUtf8 { offset: 8 })
    ));
}

#[test]
fn truncated_bare_string_is_still_an_atom() {
    let sexp = parse(r#""integer divide"#).unwrap().unwrap();
    let token = sexp.as_atom().unwrap();
    assert_eq!(r#""integer divide"#, token.text());
    assert!(!token.is_terminated());
}
