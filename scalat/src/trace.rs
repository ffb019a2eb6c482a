//! The rule-invocation instrument for `--trace`.

use rustc_hash::FxHashMap;

/// Counts entries to one named grammar rule, keyed by cursor offset.
///
/// The instrument is scoped to a run: create it, feed it through
/// [`record`](TraceInstrument::record) while parsing, and call
/// [`report`](TraceInstrument::report) once at the end. Offsets that
/// attract many invocations point at backtracking hot spots.
pub struct TraceInstrument {
    rule: String,
    counts: FxHashMap<usize, u64>,
}

impl TraceInstrument {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            counts: FxHashMap::default(),
        }
    }

    /// Notes one rule entry. Entries for other rules are ignored.
    pub fn record(&mut self, name: &str, offset: usize) {
        if name == self.rule {
            *self.counts.entry(offset).or_insert(0) += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Renders the counts, most-invoked offsets first.
    pub fn report(&self) -> String {
        let mut entries: Vec<(usize, u64)> = self.counts.iter().map(|(&o, &c)| (o, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut out = format!("rule {}: {} invocations\n", self.rule, self.total());
        for (offset, count) in entries {
            out.push_str(&format!("{count:>8}  at offset {offset}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_only_target_rule() {
        let mut tr = TraceInstrument::new("Type");
        tr.record("Type", 3);
        tr.record("Type", 3);
        tr.record("Expr", 3);
        assert_eq!(tr.total(), 2);
    }

    #[test]
    fn test_report_sorted_by_frequency() {
        let mut tr = TraceInstrument::new("Type");
        tr.record("Type", 10);
        tr.record("Type", 4);
        tr.record("Type", 4);
        let report = tr.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "rule Type: 3 invocations");
        assert!(lines[1].contains("at offset 4"));
        assert!(lines[2].contains("at offset 10"));
    }

    #[test]
    fn test_counts_across_parses() {
        let mut tr = TraceInstrument::new("Type");
        for source in ["class C { val x: Int = 1 }", "trait T { def f: Long }"] {
            let _ = scalar_syn::parse_traced(source, |name, offset| tr.record(name, offset));
        }
        assert!(tr.total() > 0);
    }
}
