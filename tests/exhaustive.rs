use {
    ahash::AHashSet,
    allsat::{types::*, *},
    std::{cell::RefCell, io, path::Path, rc::Rc},
};

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    /// parse solution records back into sets of true vars.
    fn records(&self) -> Vec<Vec<usize>> {
        String::from_utf8_lossy(&self.0.borrow())
            .lines()
            .map(|line| {
                let mut v = line
                    .split_whitespace()
                    .map(|s| s.parse::<usize>().expect("var id"))
                    .collect::<Vec<_>>();
                assert_eq!(v.pop(), Some(0));
                v
            })
            .collect()
    }
}

/// the assignments of all vars satisfying `cnf`.
fn models(cnf: &[Vec<i32>], num_vars: usize) -> Vec<Vec<bool>> {
    (0..1u32 << num_vars)
        .map(|bits| (0..num_vars).map(|i| bits & (1 << i) != 0).collect::<Vec<_>>())
        .filter(|a| {
            cnf.iter().all(|c| {
                c.iter()
                    .any(|l| a[l.unsigned_abs() as usize - 1] == (0 < *l))
            })
        })
        .collect()
}

fn projected_count(cnf: &[Vec<i32>], num_vars: usize, observed: &[usize]) -> usize {
    models(cnf, num_vars)
        .iter()
        .map(|a| observed.iter().map(|vi| a[vi - 1]).collect::<Vec<_>>())
        .collect::<AHashSet<_>>()
        .len()
}

fn run(cnf: &[Vec<i32>], config: &Config, eager: bool) -> (usize, SharedBuf) {
    let buf = SharedBuf::default();
    let mut solver = Solver::try_from(cnf).expect("valid cnf");
    solver.eager_notification = eager;
    let mut es = ExhaustiveSearch::connect(
        &mut solver,
        &config.clone().with_record_solutions(true).quiet(),
        Some(Box::new(buf.clone())),
    )
    .expect("valid observed vars");
    assert_eq!(solver.solve_with(&mut es).ok(), Some(Certificate::UNSAT));
    assert!(es.pending().is_empty());
    let n = es.disconnect(&mut solver).expect("sink works");
    (n, buf)
}

fn samples() -> Vec<Vec<Vec<i32>>> {
    vec![
        vec![vec![1, 2, 3]],
        vec![vec![1, 2], vec![-1, 3], vec![-2, -3]],
        vec![vec![1, -2], vec![2, -3], vec![3, -4], vec![4, -1]],
        vec![vec![1, 2, -3], vec![-1, -2], vec![3, 4], vec![-4, 5], vec![-5, 1, 2]],
        vec![vec![1], vec![-2, 3], vec![2, -3, 4], vec![-4, -1, 5]],
    ]
}

#[test]
fn exhaust_over_all_vars() {
    for cnf in samples() {
        let nv = CNFDescription::from(cnf.as_slice()).num_of_variables;
        let expected = models(&cnf, nv).len();
        for eager in [false, true] {
            let (n, buf) = run(&cnf, &Config::default(), eager);
            assert_eq!(n, expected, "{cnf:?} eager: {eager}");
            let records = buf.records();
            assert_eq!(records.len(), n);
            assert_eq!(records.iter().collect::<AHashSet<_>>().len(), n);
        }
    }
}

#[test]
fn exhaust_over_observed_subsets() {
    for cnf in samples() {
        let nv = CNFDescription::from(cnf.as_slice()).num_of_variables;
        for observed in [vec![1], vec![2, 1], vec![1, nv], (1..nv).collect::<Vec<_>>()] {
            let config = Config::default().with_observed(&observed);
            let (n, _) = run(&cnf, &config, false);
            assert_eq!(
                n,
                projected_count(&cnf, nv, &observed),
                "{cnf:?} on {observed:?}"
            );
        }
    }
}

#[test]
fn unsatisfiable_cnf_has_no_solution() {
    let cnf = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
    assert_eq!(run(&cnf, &Config::default(), false).0, 0);
    assert_eq!(enumerate(&cnf, &Config::default().quiet()).ok(), Some(0));
    let with_empty: Vec<Vec<i32>> = vec![vec![1], vec![]];
    assert_eq!(enumerate(&with_empty, &Config::default().quiet()).ok(), Some(0));
}

#[test]
fn polarity_filter_blocks_supersets() {
    for cnf in samples() {
        let nv = CNFDescription::from(cnf.as_slice()).num_of_variables;
        let config = Config::default().with_negative_only(true);
        let (n, buf) = run(&cnf, &config, false);
        let found = buf
            .records()
            .into_iter()
            .map(|v| v.into_iter().collect::<AHashSet<_>>())
            .collect::<Vec<_>>();
        assert_eq!(found.len(), n);
        // a later solution never contains the true vars of an earlier one
        for (i, earlier) in found.iter().enumerate() {
            for later in &found[i + 1..] {
                assert!(!earlier.is_subset(later), "{cnf:?}: {earlier:?} then {later:?}");
            }
        }
        // every model is covered by a solution
        for a in models(&cnf, nv) {
            let trues = (1..=nv).filter(|vi| a[vi - 1]).collect::<AHashSet<_>>();
            assert!(found.iter().any(|s| s.is_subset(&trues)), "{cnf:?}: {trues:?}");
        }
    }
}

#[test]
fn filter_dropping_every_literal_stops_the_search() {
    // the first model the host meets is all-false
    let cnf = vec![vec![-1, -2], vec![-2, -3]];
    let config = Config::default().with_negative_only(true);
    let (n, buf) = run(&cnf, &config, false);
    assert_eq!(n, 1);
    assert_eq!(buf.records(), vec![Vec::<usize>::new()]);
}

#[test]
fn records_follow_observed_order() {
    let cnf = vec![vec![1], vec![2], vec![-3]];
    let (_, buf) = run(&cnf, &Config::default(), false);
    assert_eq!(String::from_utf8_lossy(&buf.0.borrow()), "1 2 0\n");
    let (_, buf) = run(&cnf, &Config::default().with_observed([2, 3, 1]), false);
    assert_eq!(String::from_utf8_lossy(&buf.0.borrow()), "2 1 0\n");
}

#[test]
fn out_of_range_observed_var() {
    let mut solver = Solver::try_from(vec![vec![1, 2]].as_slice()).expect("valid");
    let config = Config::default().with_observed([1, 3]).quiet();
    assert!(matches!(
        ExhaustiveSearch::connect(&mut solver, &config, None),
        Err(SearchError::OutOfRange(3))
    ));
    assert!(matches!(
        enumerate(&[vec![1, 2]], &config),
        Err(SearchError::OutOfRange(3))
    ));
}

#[test]
fn load_dimacs_file() {
    let path = std::env::temp_dir().join(format!("allsat-{}.cnf", std::process::id()));
    std::fs::write(
        &path,
        "c a sample\np cnf 3 2\n1 2 0\n-1\n3 0\n",
    )
    .expect("writable temp dir");
    let solver = Solver::try_from(path.as_path());
    let _ = std::fs::remove_file(&path);
    let mut solver = solver.expect("valid file");
    assert_eq!(solver.num_vars(), 3);
    assert_eq!(solver.num_clauses(), 2);
    let mut es =
        ExhaustiveSearch::connect(&mut solver, &Config::default().quiet(), None).expect("ok");
    assert!(solver.solve_with(&mut es).is_ok());
    assert_eq!(es.disconnect(&mut solver).ok(), Some(4));
    assert!(matches!(
        Solver::try_from(Path::new("/nonexistent/allsat.cnf")),
        Err(SearchError::Io(_))
    ));
}

/// write `body` to a fresh temp file, run `f` on it, then remove it.
fn with_cnf_file<T>(name: &str, body: &str, f: impl FnOnce(&Path) -> T) -> T {
    let path = std::env::temp_dir().join(format!("allsat-{}-{name}.cnf", std::process::id()));
    std::fs::write(&path, body).expect("writable temp dir");
    let result = f(path.as_path());
    let _ = std::fs::remove_file(&path);
    result
}

#[test]
fn load_satlib_file_with_trailer() {
    let body = "c uf\np cnf 3 2\n1 2 0\n-1 3 0\n%\n0\n\n";
    let solver = with_cnf_file("satlib", body, |p| Solver::try_from(p));
    let solver = solver.expect("the trailer is not a clause");
    assert_eq!(solver.num_clauses(), 2);
    let n = with_cnf_file("satlib-count", body, |p| {
        enumerate_file(p, &Config::default().quiet(), None)
    });
    assert_eq!(n.ok(), Some(4));
}

#[test]
fn file_with_empty_clause_has_no_solution() {
    let body = "p cnf 2 2\n1 2 0\n0\n";
    let n = with_cnf_file("empty-clause", body, |p| {
        enumerate_file(p, &Config::default().quiet(), None)
    });
    assert_eq!(n.ok(), Some(0));
    let records = SharedBuf::default();
    let n = with_cnf_file("records", "p cnf 2 1\n-1 0\n", |p| {
        enumerate_file(
            p,
            &Config::default().with_record_solutions(true).quiet(),
            Some(Box::new(records.clone())),
        )
    });
    assert_eq!(n.ok(), Some(2));
    assert_eq!(records.records(), vec![vec![], vec![2]]);
}
