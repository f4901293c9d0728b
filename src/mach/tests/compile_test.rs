use super::*;

#[test]
fn test_label_before_line() {
    let loader = MemoryLoader::new().with("a.bas", "start:\n10 GOSUB start\n");
    let program = build(&loader, &["a.bas"], &Options::default());
    assert_eq!(
        program.to_bytes(),
        [0x01, 0x08, 0x09, 0x08, 10, 0, 0x8D, b'1', b'0', 0, 0, 0]
    );
}

#[test]
fn test_forward_label_and_auto_numbers() {
    let loader = MemoryLoader::new().with("a.bas", "10 GOTO done\nPRINT\ndone: END\n");
    let program = build(&loader, &["a.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [
            (10, vec![0x89, b'1', b'2']),
            (11, vec![0x99]),
            (12, vec![0x80]),
        ]
    );
}

#[test]
fn test_dangling_label() {
    let loader = MemoryLoader::new().with("a.bas", "100 PRINT\n20 GOTO done\ndone:\n");
    let program = build(&loader, &["a.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [
            (100, vec![0x99]),
            (20, vec![0x89, b'1', b'0', b'1']),
            (101, vec![0x8F]),
        ]
    );
    assert_eq!(program.lines()[2].index(), None);
}

#[test]
fn test_crunch() {
    let loader = MemoryLoader::new().with("a.bas", "10 GOTO 20\n20 GOTO 10\n");
    let options = Options {
        crunch: true,
        ..Options::default()
    };
    let program = build(&loader, &["a.bas"], &options);
    assert_eq!(
        program.to_bytes(),
        [
            0x01, 0x08, 0x08, 0x08, 1, 0, 0x89, b'2', 0, 0x0F, 0x08, 2, 0, 0x89, b'1', 0, 0,
            0
        ]
    );
}

#[test]
fn test_crunch_repeated_number() {
    let loader = MemoryLoader::new().with(
        "a.bas",
        "10 PRINT\n10 END\nPRINT\nhere: END\n20 GOTO here\n",
    );
    let options = Options {
        crunch: true,
        ..Options::default()
    };
    let program = build(&loader, &["a.bas"], &options);
    assert_eq!(
        numbered(&program),
        [
            (1, vec![0x99]),
            (2, vec![0x80]),
            (3, vec![0x99]),
            (4, vec![0x80]),
            (5, vec![0x89, b'4']),
        ]
    );
}

#[test]
fn test_label_case_insensitive() {
    let loader = MemoryLoader::new().with(
        "a.bas",
        "START: PRINT\nloop: GOSUB Start\nGOTO LOOP\n",
    );
    let program = build(&loader, &["a.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [
            (1, vec![0x99]),
            (2, vec![0x8D, b'1']),
            (3, vec![0x89, b'2']),
        ]
    );
}

#[test]
fn test_addresses_follow_sizes() {
    let loader = MemoryLoader::new().with(
        "a.bas",
        "10 PRINT \"HELLO\"\n20 REM\n5 FOR I=1 TO 10:NEXT\n30\n",
    );
    let program = build(&loader, &["a.bas"], &Options::default());
    let mut address = 0x0801;
    for line in program.lines().iter().filter(|line| !line.is_empty()) {
        assert_eq!(line.address(), address);
        assert_eq!(line.next_address() - line.address(), 4 + line.bytes().len() + 1);
        address = line.next_address();
    }
    assert_eq!(program.lines().len(), 4);
    assert_eq!(program.to_bytes().len(), 2 + address - 0x0801 + 2);
}

#[test]
fn test_load_address() {
    let loader = MemoryLoader::new().with("a.bas", "10 END\n");
    let options = Options {
        load_address: 0x1C01,
        ..Options::default()
    };
    let image = build(&loader, &["a.bas"], &options).to_bytes();
    assert_eq!(image, [0x01, 0x1C, 0x07, 0x1C, 10, 0, 0x80, 0, 0, 0]);
}

#[test]
fn test_case_directives() {
    let loader = MemoryLoader::new().with(
        "a.bas",
        "#lower\n10 PRINT \"A\"\n#cset0\n20 PRINT \"A\"\n",
    );
    let program = build(&loader, &["a.bas"], &Options::default());
    assert_eq!(
        numbered(&program),
        [
            (10, vec![0x99, b' ', b'"', 0x61, b'"']),
            (20, vec![0x99, b' ', b'"', 0x41, b'"']),
        ]
    );
    let lower = Options {
        case: Case::Lower,
        ..Options::default()
    };
    let loader = MemoryLoader::new().with("b.bas", "10 PRINT \"A\"\n#upper\n");
    let names = ["b.bas", "b.bas"];
    let program = build(&loader, &names, &lower);
    assert_eq!(numbered(&program)[0].1[3], 0x61);
    assert_eq!(numbered(&program)[1].1[3], 0x41);
}

#[test]
fn test_undefined_label() {
    let loader = MemoryLoader::new().with("a.bas", "10 PRINT\n\n20 GOTO nowhere\n");
    let error = compile(&loader, &inputs(&["a.bas"]), &Options::default()).unwrap_err();
    assert_eq!(error.code(), ErrorCode::UndefinedLabel);
    assert_eq!(error.unit(), Some("/a.bas"));
    assert_eq!(error.line(), Some(2));
    assert_eq!(error.to_string(), "/a.bas(3,9): error: UNDEFINED LABEL; 'nowhere'");
}

#[test]
fn test_missing_input() {
    let loader = MemoryLoader::new();
    let error = compile(&loader, &inputs(&["none.bas"]), &Options::default()).unwrap_err();
    assert_eq!(error.code(), ErrorCode::UnreadableInput);
    assert_eq!(error.unit(), Some("/none.bas"));
}

#[test]
fn test_debug_map() {
    let loader = MemoryLoader::new()
        .with("main.bas", "10 PRINT\n#include \"b.bas\"\n20 END\n")
        .with("b.bas", "15 REM X\n");
    let program = build(&loader, &["main.bas"], &Options::default());
    assert_eq!(
        program.debug_map(),
        "/main.bas\n2049,2054,10,0,8\n/b.bas\n2055,2062,15,0,8\n/main.bas\n2063,2068,20,2,6\n"
    );
}
