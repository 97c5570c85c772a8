//! Solution counter and solution records.
use {
    crate::{
        assign::{AssignIF, AssignStack},
        types::*,
    },
    std::{fmt, io::Write},
    tracing::{info, warn},
};

/// Counts solutions and, if enabled, writes one record per solution:
/// the positive observed vars, space separated, then `0` and a newline.
/// Records go to the sink if one is given, otherwise to the log.
pub struct SolutionRecorder {
    sink: Option<Box<dyn Write>>,
    enabled: bool,
    num_solutions: usize,
    /// the first write error; no more records are written after it.
    error: Option<std::io::Error>,
}

impl fmt::Debug for SolutionRecorder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SolutionRecorder")
            .field("sink", &self.sink.is_some())
            .field("enabled", &self.enabled)
            .field("num_solutions", &self.num_solutions)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for SolutionRecorder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#solution: {}", self.num_solutions)
    }
}

impl Default for SolutionRecorder {
    fn default() -> Self {
        SolutionRecorder::new(false, None)
    }
}

impl SolutionRecorder {
    pub fn new(enabled: bool, sink: Option<Box<dyn Write>>) -> Self {
        SolutionRecorder {
            sink,
            enabled,
            num_solutions: 0,
            error: None,
        }
    }
    pub fn num_solutions(&self) -> usize {
        self.num_solutions
    }
    /// count the current complete assignment as a new solution.
    pub fn record(&mut self, asg: &AssignStack) {
        self.num_solutions += 1;
        if !self.enabled {
            return;
        }
        let line = format_record(asg);
        match self.sink {
            Some(ref mut out) => {
                if self.error.is_some() {
                    return;
                }
                if let Err(e) = out.write_all(line.as_bytes()) {
                    warn!(error = %e, "failed to write solution {}", self.num_solutions);
                    self.error = Some(e);
                }
            }
            None => info!("New solution: {}", line.trim_end()),
        }
    }
    /// flush the sink and hand over the first write error if any.
    ///
    /// # Errors
    ///
    /// `SearchError::Io` if a record couldn't be written.
    pub fn flush(&mut self) -> MaybeInconsistent {
        if let Some(e) = self.error.take() {
            return Err(SearchError::Io(e));
        }
        if let Some(ref mut out) = self.sink {
            out.flush()?;
        }
        Ok(())
    }
}

/// make the record of the current assignment, like `1 3 0\n`.
pub fn format_record(asg: &AssignStack) -> String {
    let mut line = String::new();
    for vi in asg.observed() {
        if asg.assigned(*vi).map_or(false, |l| l.is_positive()) {
            line.push_str(&format!("{vi} "));
        }
    }
    line.push_str("0\n");
    line
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{cell::RefCell, io, rc::Rc},
    };

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn stack(observed: &[VarId], lits: &[i32]) -> AssignStack {
        let mut asg = AssignStack::new(4, observed).expect("in range");
        for l in lits {
            asg.assign(Lit::try_from(*l).expect("non-zero")).expect("ok");
        }
        asg
    }

    #[test]
    fn test_record_format() {
        assert_eq!(format_record(&stack(&[1, 2, 3], &[1, -2, 3])), "1 3 0\n");
        assert_eq!(format_record(&stack(&[3, 1], &[1, 3])), "3 1 0\n");
        assert_eq!(format_record(&stack(&[1, 2], &[-1, -2])), "0\n");
    }

    #[test]
    fn test_record_to_sink() {
        let buf = SharedBuf::default();
        let mut rec = SolutionRecorder::new(true, Some(Box::new(buf.clone())));
        rec.record(&stack(&[1, 2], &[1, -2]));
        rec.record(&stack(&[1, 2], &[-1, 2]));
        assert!(rec.flush().is_ok());
        assert_eq!(rec.num_solutions(), 2);
        assert_eq!(String::from_utf8_lossy(&buf.0.borrow()), "1 0\n2 0\n");
    }

    #[test]
    fn test_disabled_recorder_only_counts() {
        let buf = SharedBuf::default();
        let mut rec = SolutionRecorder::new(false, Some(Box::new(buf.clone())));
        rec.record(&stack(&[1], &[1]));
        assert_eq!(rec.num_solutions(), 1);
        assert!(buf.0.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_is_kept() {
        let mut rec = SolutionRecorder::new(true, Some(Box::new(Broken)));
        rec.record(&stack(&[1], &[1]));
        rec.record(&stack(&[1], &[-1]));
        assert_eq!(rec.num_solutions(), 2);
        assert!(matches!(rec.flush(), Err(SearchError::Io(_))));
        assert!(rec.flush().is_ok());
    }
}
