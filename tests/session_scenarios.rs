//! End-to-end command scenarios driven through the session and the shell

use minimat::{shell, Control, MinimatConfig, Session, Vec3};
use std::io::Cursor;

fn run_lines(session: &mut Session, lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let mut out = Vec::new();
            session.execute(line, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        })
        .collect()
}

#[test]
fn test_cross_product_assignment() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = 1,0,0", "b = 0,1,0", "c = a x b"]);

    assert_eq!(out[2], "c = (0.00, 0.00, 1.00)\n");
    assert_eq!(
        session.store().lookup("c").unwrap().value,
        Vec3::new(0.0, 0.0, 1.0)
    );
}

#[test]
fn test_dot_product_without_assignment() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = 1,2,3", "a . a"]);
    assert_eq!(out[1], "a . a = 14.00\n");
}

#[test]
fn test_list_after_clear_prints_nothing() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = 1", "b = 2", "clear", "list"]);
    assert_eq!(out[2], "");
    assert_eq!(out[3], "");
    assert!(session.store().is_empty());
}

#[test]
fn test_list_in_insertion_order() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["z = 1", "a = 2", "z = 3", "list"]);
    assert_eq!(out[3], "z: (3.00, 0.00, 0.00)\na: (2.00, 0.00, 0.00)\n");
}

#[test]
fn test_subtraction_overwrites_destination() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = 5 5 5", "b = 1 2 3", "a = a - b", "a"]);
    assert_eq!(out[2], "a = (4.00, 3.00, 2.00)\n");
    assert_eq!(out[3], "a: (4.00, 3.00, 2.00)\n");
    assert_eq!(session.store().len(), 2);
}

#[test]
fn test_decimal_and_negative_components() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["v = -1.5, 0.25, 1e2"]);
    assert_eq!(out[0], "v: (-1.50, 0.25, 100.00)\n");
}

#[test]
fn test_names_containing_operator_letters() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["max = 1 2 3", "x = 0 0 1", "max x x"]);
    assert_eq!(out[0], "max: (1.00, 2.00, 3.00)\n");
    assert_eq!(out[2], "max x x = (2.00, -1.00, 0.00)\n");
}

#[test]
fn test_component_assignment_echoes_stored_vector() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = 1 2 3", "b = 1 1 1", "c = a + b", "d = a * 2"]);
    assert_eq!(out[0], "a: (1.00, 2.00, 3.00)\n");
    assert_eq!(out[1], "b: (1.00, 1.00, 1.00)\n");
    assert_eq!(out[2], "c = (2.00, 3.00, 4.00)\n");
    assert_eq!(out[3], "d = (2.00, 4.00, 6.00)\n");
}

#[test]
fn test_inf_and_nan_are_names() {
    let mut session = Session::default();
    let out = run_lines(&mut session, &["a = inf", "inf = 1 2 3", "nan = inf * 2", "nan"]);
    assert_eq!(out[0], "Unknown variable\n");
    assert_eq!(out[1], "inf: (1.00, 2.00, 3.00)\n");
    assert_eq!(out[2], "nan = (2.00, 4.00, 6.00)\n");
    assert_eq!(out[3], "nan: (2.00, 4.00, 6.00)\n");
    assert!(session.store().lookup("a").is_none());
}

#[test]
fn test_diagnostics_leave_store_untouched() {
    let mut session = Session::default();
    let out = run_lines(
        &mut session,
        &["a = 1 2 3", "b = a + nope", "b = a ^ a", "b = a * c", "b = 1 foo", "???"],
    );
    assert_eq!(out[1], "Unknown variable\n");
    assert_eq!(out[2], "Invalid operator: ^\n");
    assert_eq!(out[3], "Invalid scalar multiplication\n");
    assert_eq!(out[4], "Unknown variable or command\n");
    assert_eq!(out[5], "Unknown variable or command\n");
    assert_eq!(session.store().len(), 1);
}

#[test]
fn test_quit_ends_shell_regardless_of_state() {
    let mut session = Session::default();
    let mut out = Vec::new();
    shell::run(
        &mut session,
        Cursor::new("a = 1 2 3\nb = a x a\nquit\na\n"),
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("minimat> "));
    assert!(!text.contains("a: ("));
    assert!(session.store().is_empty());
}

#[test]
fn test_custom_prompt_and_name_limit() {
    let config = MinimatConfig {
        prompt: "> ".to_string(),
        max_name_len: 3,
        ..MinimatConfig::default()
    };
    let mut session = Session::new(config);
    let mut out = Vec::new();
    shell::run(&mut session, Cursor::new("abc = 1\nabcd = 1\n"), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("> abc: (1.00, 0.00, 0.00)\n> Invalid name: abcd"));
}

#[test]
fn test_execute_reports_quit() {
    let mut session = Session::default();
    session.store_mut().upsert("a", 1.0, 1.0, 1.0).unwrap();
    assert_eq!(session.execute("exit", &mut Vec::new()).unwrap(), Control::Quit);
}
