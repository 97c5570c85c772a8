use {
    super::SearchError,
    std::{
        fmt,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// CNF locator
#[derive(Clone, Debug, Default)]
pub enum CNFIndicator {
    /// not specified
    #[default]
    Void,
    /// from a file
    File(String),
    /// embedded directly
    LitVec(usize),
}

impl fmt::Display for CNFIndicator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CNFIndicator::Void => write!(f, "No CNF specified"),
            CNFIndicator::File(file) => write!(f, "CNF file({file})"),
            CNFIndicator::LitVec(n) => write!(f, "A vec({n} clauses)"),
        }
    }
}

/// Data storage about a problem.
#[derive(Clone, Debug, Default)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
    pub pathname: CNFIndicator,
}

impl fmt::Display for CNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let CNFDescription {
            num_of_variables: nv,
            num_of_clauses: nc,
            pathname: path,
        } = &self;
        write!(f, "CNF({nv}, {nc}, {path})")
    }
}

impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let num_of_variables = vec
            .iter()
            .map(|clause| {
                clause
                    .as_ref()
                    .iter()
                    .map(|l| l.unsigned_abs())
                    .max()
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0) as usize;
        CNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
            pathname: CNFIndicator::LitVec(vec.len()),
        }
    }
}

/// A wrapper structure to make a CNFDescription from a file.
/// The header is consumed by `try_from`; clauses are read by `read_clauses`.
#[derive(Debug)]
pub struct CNFReader {
    pub cnf: CNFDescription,
    pub reader: BufReader<File>,
}

impl TryFrom<&Path> for CNFReader {
    type Error = SearchError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let pathname = path
            .file_name()
            .map_or("--".to_string(), |f| f.to_string_lossy().into_owned());
        let mut reader = BufReader::new(File::open(path)?);
        let mut buf = String::new();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                return Err(SearchError::InvalidHeader);
            }
            let mut iter = buf.split_whitespace();
            if iter.next() == Some("p") && iter.next() == Some("cnf") {
                let nv = iter.next().and_then(|s| s.parse::<usize>().ok());
                let nc = iter.next().and_then(|s| s.parse::<usize>().ok());
                let (Some(num_of_variables), Some(num_of_clauses)) = (nv, nc) else {
                    return Err(SearchError::InvalidHeader);
                };
                let cnf = CNFDescription {
                    num_of_variables,
                    num_of_clauses,
                    pathname: CNFIndicator::File(pathname),
                };
                return Ok(CNFReader { cnf, reader });
            }
        }
    }
}

impl CNFReader {
    /// read the clause section. Comment lines are skipped and a clause may span lines.
    /// Reading stops at a `%` line.
    ///
    /// # Errors
    ///
    /// * `SearchError::Io` on a read failure.
    /// * `SearchError::InvalidLiteral` on a token which isn't an integer.
    /// * `SearchError::OutOfRange` on a literal beyond the header's var count.
    pub fn read_clauses(&mut self) -> Result<Vec<Vec<i32>>, SearchError> {
        let nv = self.cnf.num_of_variables;
        let mut clauses: Vec<Vec<i32>> = Vec::with_capacity(self.cnf.num_of_clauses);
        let mut clause: Vec<i32> = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            if buf.starts_with('%') {
                // SATLIB trailer; a bare `0` follows it
                break;
            }
            if buf.starts_with('c') {
                continue;
            }
            for token in buf.split_whitespace() {
                let l = token
                    .parse::<i32>()
                    .map_err(|_| SearchError::InvalidLiteral)?;
                if l == 0 {
                    clauses.push(std::mem::take(&mut clause));
                } else if nv < l.unsigned_abs() as usize {
                    return Err(SearchError::OutOfRange(l));
                } else {
                    clause.push(l);
                }
            }
        }
        if !clause.is_empty() {
            clauses.push(clause);
        }
        Ok(clauses)
    }
}
