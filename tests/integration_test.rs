// Integration tests for the KRL front-end

use krlparse::{
    parse_data_file, parse_module, parse_source_file, AstNode, Direction, Frontend, FunctionCall,
    ParseError, SourceLocation, Type,
};

const PICK_SRC: &str = r#"&ACCESS RVP
&REL 3
&PARAM TEMPLATE = C:\KRC\Roboter\Template\vorgabe

DEF pick(part:IN, result:OUT)
  ; approach the part first
  approach(part)
  grip(part, result)

  retract()
END

GLOBAL DEFFCT BOOL is_ready()
  check_sensors()
ENDFCT
"#;

const PICK_DAT: &str = r#"&ACCESS RVP
&REL 3

DEFDAT pick PUBLIC
ENDDAT
"#;

#[test]
fn test_full_module() {
    let module = parse_module("pick", PICK_SRC, PICK_DAT).expect("Parsing failed");

    assert_eq!(module.name, "pick");
    assert_eq!(module.source_file.name, "pick");
    assert_eq!(module.data_file.name, "pick");

    let attributes: Vec<_> = module
        .source_file
        .file_attributes
        .iter()
        .map(|a| a.raw_value.as_str())
        .collect();
    assert_eq!(
        attributes,
        vec![
            "ACCESS RVP",
            "REL 3",
            r"PARAM TEMPLATE = C:\KRC\Roboter\Template\vorgabe"
        ]
    );

    let pick = &module.source_file.statements[0];
    assert_eq!(pick.name, "pick");
    assert!(!pick.is_global);
    assert_eq!(pick.parameters[0].direction, Direction::In);
    assert_eq!(pick.parameters[1].direction, Direction::Out);
    assert_eq!(
        pick.body,
        vec![
            FunctionCall {
                name: "approach".to_string(),
                arguments: vec!["part".to_string()],
                location: SourceLocation::new(7, 3),
            },
            FunctionCall {
                name: "grip".to_string(),
                arguments: vec!["part".to_string(), "result".to_string()],
                location: SourceLocation::new(8, 3),
            },
            FunctionCall {
                name: "retract".to_string(),
                arguments: vec![],
                location: SourceLocation::new(10, 3),
            },
        ]
    );

    let ready = &module.source_file.statements[1];
    assert_eq!(ready.name, "is_ready");
    assert!(ready.is_global);
    assert_eq!(ready.return_type, Some(Type::new("BOOL")));

    let data = module.data_file.definition().expect("data definition");
    assert_eq!(data.name, "pick");
    assert!(data.is_public);
}

#[test]
fn test_statement_order_preserved() {
    let source = "DEFFCT INT A()\nENDFCT\nDEF B()\nEND\nGLOBAL DEF C()\nEND\n";
    let file = parse_source_file("abc", source).expect("Parsing failed");

    let names: Vec<_> = file.statements.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_global_function_keeps_modifier() {
    // A GLOBAL in front of DEFFCT must not be swallowed by the DEF alternative.
    let file = parse_source_file("f", "GLOBAL DEFFCT INT f()\nENDFCT\n").expect("Parsing failed");

    let def = &file.statements[0];
    assert!(def.is_global);
    assert!(def.is_function());
    assert_eq!(def.location, SourceLocation::new(1, 1));
}

#[test]
fn test_data_file_definition_count() {
    let two = parse_data_file("d", "DEFDAT a\nENDDAT\nDEFDAT b\nENDDAT\n").unwrap_err();
    assert_eq!(two.message(), "More than one data definition found");

    let none = parse_data_file("d", "&ACCESS RVP\n").unwrap_err();
    assert_eq!(none.message(), "No data definition found");
}

#[test]
fn test_data_file_rejects_trailing_tokens() {
    let err = parse_data_file("x", "DEFDAT a\nENDDAT\nfoo").unwrap_err();

    assert_eq!(err.message(), "Expected end of file, found identifier");
    assert_eq!(err.location(), SourceLocation::new(3, 1));
}

#[test]
fn test_source_file_without_definition() {
    let err = parse_source_file("empty", "").unwrap_err();

    assert!(matches!(err, ParseError::Syntax(_)));
    assert_eq!(err.message(), "No module or function definition found");
    assert_eq!(err.location(), SourceLocation::new(1, 1));
}

#[test]
fn test_parameter_without_direction() {
    let err = parse_source_file("p", "DEF foo(a:, b:OUT)\nEND\n").unwrap_err();

    assert!(err.message().contains("'IN'") || err.message().contains("'OUT'"));
    assert_eq!(err.location(), SourceLocation::new(1, 11));
}

#[test]
fn test_function_missing_return_type() {
    let err = parse_source_file("f", "DEFFCT foo()\nENDFCT\n").unwrap_err();

    assert_eq!(err.location(), SourceLocation::new(1, 11));
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 11: Expected identifier, found '('"
    );
}

#[test]
fn test_module_reports_data_error() {
    let err = parse_module("m", "DEF m()\nEND\n", "DEFDAT m\n").unwrap_err();

    assert_eq!(err.message(), "Expected 'ENDDAT', found end of file");
    assert_eq!(err.location(), SourceLocation::new(2, 1));
}

#[test]
fn test_lexer_error_surfaces_location() {
    let err = parse_source_file("x", "DEF x()\n  a = b\nEND\n").unwrap_err();

    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.location(), SourceLocation::new(2, 5));
}

#[test]
fn test_parsing_is_deterministic() {
    let mut first = Frontend::new();
    let mut second = Frontend::new();
    first.parse_module("pick", PICK_SRC, PICK_DAT).unwrap();
    second.parse_module("pick", PICK_SRC, PICK_DAT).unwrap();

    assert_eq!(first.program(), second.program());
}

#[test]
fn test_frontend_accumulates() {
    let mut frontend = Frontend::new();
    frontend.parse_source_file("pick", PICK_SRC).unwrap();
    frontend.parse_data_file("pick", PICK_DAT).unwrap();

    assert!(frontend.parse_data_file("broken", "DEFDAT x\nENDDAT\nDEFDAT y\nENDDAT\n").is_err());

    let ast = frontend.ast();
    assert_eq!(ast.len(), 2);
    assert!(matches!(ast[0], AstNode::SourceFile(_)));
    assert!(matches!(ast[1], AstNode::DataFile(_)));
}

#[cfg(feature = "serde")]
#[test]
fn test_ast_serializes_to_json() {
    let file = parse_source_file("s", "GLOBAL DEF s(a:IN)\n  go(a)\nEND\n").unwrap();
    let json = serde_json::to_value(&file).expect("serialize");

    assert_eq!(json["statements"][0]["name"], "s");
    assert_eq!(json["statements"][0]["is_global"], true);
    assert_eq!(json["statements"][0]["parameters"][0]["direction"], "In");
    assert_eq!(json["statements"][0]["body"][0]["arguments"][0], "a");

    let back: krlparse::SourceFile = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, file);
}
