/// Enumerate the solutions of a CNF file over a set of observed vars.
///
/// To run me:
///```ignore
/// RUST_LOG=info cargo run --example all-solutions -- a.cnf [VAR...]
///```
/// Negative var ids turn the polarity filter on; solution records go to stdout.
use {
    allsat::*,
    std::{env::args, io, path::Path, process::exit},
    tracing_subscriber::EnvFilter,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let mut args = args().skip(1);
    let Some(cnf_file) = args.next() else {
        eprintln!("usage: all-solutions CNF [VAR...]");
        exit(1);
    };
    let mut observed = Vec::new();
    let mut negative_only = false;
    for arg in args {
        match arg.parse::<i64>() {
            Ok(v) if v < 0 => {
                negative_only = true;
                observed.push(v.unsigned_abs() as usize);
            }
            Ok(v) if 0 < v => observed.push(v as usize),
            _ => {
                eprintln!("not a var id: {arg}");
                exit(1);
            }
        }
    }
    let config = Config::default()
        .with_observed(observed)
        .with_negative_only(negative_only)
        .with_record_solutions(true);
    match enumerate_file(Path::new(&cnf_file), &config, Some(Box::new(io::stdout()))) {
        Ok(n) => println!("c #solution: {n}"),
        Err(e) => {
            println!("s UNKNOWN; {e}");
            exit(1);
        }
    }
}
