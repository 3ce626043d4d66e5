// dbgview: renders aliased and cyclic values with a connector diagram

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use dbgview::render::GlyphSet;
use dbgview::{here, inspect_struct, Report, RenderOptions};
use tracing_subscriber::EnvFilter;

struct Node {
    name: String,
    next: Option<Rc<RefCell<Node>>>,
}

inspect_struct!(Node { name, next });

struct Pair<'a> {
    left: &'a i32,
    right: &'a i32,
}

inspect_struct!(Pair<'a> { left, right });

struct Flags {
    pretty: bool,
    ascii: bool,
    show_identity: bool,
    viewer: bool,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--pretty] [--ascii] [--show-identity] [--viewer]", program_name);
    eprintln!();
    eprintln!("  --pretty         one field per line, no diagram");
    eprintln!("  --ascii          draw the diagram with ASCII characters");
    eprintln!("  --show-identity  print reused references as addresses");
    eprintln!("  --viewer         open the report in a terminal viewer");
    eprintln!();
    eprintln!("Environment: DBGVIEW_POINTERS, DBGVIEW_SHOW_IDENTITY, DBGVIEW_PRETTY,");
    eprintln!("             DBGVIEW_MAX_DEPTH, DBGVIEW_GLYPHS, RUST_LOG");
}

fn parse_flags(args: &[String]) -> Option<Flags> {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("dbgview");
    let mut flags = Flags {
        pretty: false,
        ascii: false,
        show_identity: false,
        viewer: false,
    };

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--pretty" => flags.pretty = true,
            "--ascii" => flags.ascii = true,
            "--show-identity" => flags.show_identity = true,
            "--viewer" => flags.viewer = true,
            "-h" | "--help" => {
                usage(program_name);
                return None;
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                eprintln!();
                usage(program_name);
                std::process::exit(1);
            }
        }
    }

    Some(flags)
}

/// Three nodes linked into a ring
fn ring() -> Rc<RefCell<Node>> {
    let names = ["head", "middle", "tail"];
    let nodes: Vec<Rc<RefCell<Node>>> = names
        .iter()
        .map(|name| {
            Rc::new(RefCell::new(Node {
                name: name.to_string(),
                next: None,
            }))
        })
        .collect();

    for (i, node) in nodes.iter().enumerate() {
        let next = Rc::clone(&nodes[(i + 1) % nodes.len()]);
        node.borrow_mut().next = Some(next);
    }

    Rc::clone(&nodes[0])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(flags) = parse_flags(&args) else {
        return Ok(());
    };

    let mut options = RenderOptions::from_env()
        .with_pretty(flags.pretty)
        .with_show_identity_value(flags.show_identity);
    if flags.ascii {
        options = options.with_glyphs(GlyphSet::Ascii);
    }

    let shared = 1;
    let pair = Pair {
        left: &shared,
        right: &shared,
    };
    let head = ring();
    let mut scores = BTreeMap::new();
    scores.insert("alice", 3);
    scores.insert("bob", 5);

    let breaker = Report::new(here!())
        .with_options(options)
        .variable("pair", &pair)
        .variable("ring", &head)
        .variable("scores", &scores)
        .emit();

    if flags.viewer {
        breaker.view(true)?;
    }

    // Break the ring so the nodes are freed
    head.borrow_mut().next = None;

    Ok(())
}
