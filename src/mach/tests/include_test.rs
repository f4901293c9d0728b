use super::*;

#[test]
fn test_include_in_place() {
    let loader = MemoryLoader::new()
        .with("main.bas", "10 GOSUB routine\n20 END\n#include \"lib/util.bas\"\n")
        .with("lib/util.bas", "routine:\nPRINT \"X\"\nRETURN\n");
    let program = build(&loader, &["main.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [
            (10, vec![0x8D, b'2', b'1']),
            (20, vec![0x80]),
            (21, vec![0x99, b' ', b'"', b'X', b'"']),
            (22, vec![0x8E]),
        ]
    );
    assert!(program.lines()[2].is_meta());
    assert_eq!(program.lines()[2].trace(), "#include \"/lib/util.bas\"");
    assert_eq!(&**program.lines()[3].unit(), "/lib/util.bas");
}

#[test]
fn test_include_path() {
    let loader = MemoryLoader::new()
        .with("src/main.bas", "#include 'util.bas'\n10 GOTO util\n")
        .with("lib/util.bas", "util:\n1000 RETURN\n");
    let options = Options {
        include_path: vec![PathBuf::from("/lib")],
        ..Options::default()
    };
    let program = build(&loader, &["src/main.bas"], &options);
    assert_eq!(
        numbered(&program),
        [(1000, vec![0x8E]), (10, vec![0x89, b'1', b'0', b'0', b'0'])]
    );
}

#[test]
fn test_labels_cross_units() {
    let loader = MemoryLoader::new()
        .with("a.bas", "10 GOTO later\nlater:\n")
        .with("b.bas", "50 END\n");
    let program = build(&loader, &["a.bas", "b.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [(10, vec![0x89, b'5', b'0']), (50, vec![0x80])]
    );
}

#[test]
fn test_include_not_found() {
    let loader = MemoryLoader::new().with("a.bas", "10 END\n#include \"gone.bas\"\n");
    let error = compile(&loader, &inputs(&["a.bas"]), &Options::default()).unwrap_err();
    assert_eq!(error.code(), ErrorCode::IncludeNotFound);
    assert_eq!(error.line(), Some(1));
}

#[test]
fn test_recursive_include() {
    let loader = MemoryLoader::new()
        .with("a.bas", "#include \"b.bas\"\n")
        .with("b.bas", "10 END\n#include \"a.bas\"\n");
    let error = compile(&loader, &inputs(&["a.bas"]), &Options::default()).unwrap_err();
    assert_eq!(error.code(), ErrorCode::RecursiveInclude);
    assert_eq!(error.unit(), Some("/b.bas"));
}
