use dbgview::facade::pretty::reflow;
use dbgview::{format_flat, inspect_struct, Arg, DebugError, Formatter, RenderOptions};
use pretty_assertions::assert_eq;

struct Pair<'a> {
    a: &'a i32,
    b: &'a i32,
}

inspect_struct!(Pair<'a> { a, b });

struct Job {
    id: u32,
    tags: Vec<&'static str>,
}

inspect_struct!(Job { id, tags });

#[test]
fn test_format_flat_pairs() {
    let (count, name) = (2, "job");
    let args = [
        Arg::from("count"),
        Arg::value(&count),
        Arg::from("name"),
        Arg::value(&name),
    ];
    assert_eq!(
        format_flat(&args).unwrap(),
        "count = 2, \nname = \"job\"\n"
    );
}

#[test]
fn test_format_flat_odd_count() {
    let x = 1;
    let err = format_flat(&[Arg::from("x"), Arg::value(&x), Arg::from("y")]).unwrap_err();
    assert!(matches!(err, DebugError::MissingValue { count: 3, .. }));
    assert_eq!(
        err.to_string(),
        "label 'y' has no value (argument count 3 is odd)"
    );
}

#[test]
fn test_format_flat_misplaced_items() {
    let x = 1;
    let err = format_flat(&[Arg::value(&x), Arg::value(&x)]).unwrap_err();
    assert_eq!(err.to_string(), "argument 0 must be a text label");

    let err = format_flat(&[Arg::from("x"), Arg::from("y")]).unwrap_err();
    assert_eq!(err.to_string(), "argument 1 must be a value, got label 'y'");
}

#[test]
fn test_pretty_suppresses_diagram() {
    let shared = 1;
    let pair = Pair {
        a: &shared,
        b: &shared,
    };
    let formatter = Formatter::new(RenderOptions::default().with_pretty(true));

    assert_eq!(
        formatter.format(&[("pair", &pair)]),
        "pair = Pair{\n    a: &1,\n    b: &,\n}\n"
    );
}

#[test]
fn test_pretty_keeps_sequences_inline() {
    let job = Job {
        id: 7,
        tags: vec!["a", "b"],
    };
    let formatter = Formatter::new(RenderOptions::default().with_pretty(true));

    assert_eq!(
        formatter.render(&[&job]),
        "Job{\n    id: 7,\n    tags: &str[\"a\", \"b\"],\n}"
    );
    assert_eq!(reflow("Job{ id: 7 }"), "Job{\n    id: 7,\n}");
}

#[test]
fn test_show_identity_value() {
    let shared = 1;
    let pair = Pair {
        a: &shared,
        b: &shared,
    };
    let formatter = Formatter::new(
        RenderOptions::default()
            .with_print_pointers(false)
            .with_show_identity_value(true),
    );

    let address = &shared as *const i32 as usize;
    assert_eq!(
        formatter.render(&[&pair]),
        format!("Pair{{ a: &1, b: 0x{:x} }}", address)
    );
}

#[test]
fn test_render_macro() {
    let v = vec![1u8];
    assert_eq!(dbgview::render!(false, v), "u8[1]");
    assert_eq!(dbgview::render!(false, 1, 2), "[1, 2]");
}

#[test]
fn test_depth_limit_option() {
    let nested = vec![vec![vec![1]]];
    let formatter = Formatter::new(RenderOptions::default().with_max_depth(2));
    assert_eq!(
        formatter.render(&[&nested]),
        "Vec<Vec<i32>>[Vec<i32>[`Depth Limit`]]"
    );
}
