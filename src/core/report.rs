use serde::{Deserialize, Serialize};

/// One labelled result line produced by a challenge function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub set: String,
    pub label: String,
    pub value: String,
}

/// Everything a single challenge set printed during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetReport {
    pub set: String,
    pub entries: Vec<ReportEntry>,
}

impl SetReport {
    pub fn new(set: impl Into<String>) -> Self {
        Self {
            set: set.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl std::fmt::Display) {
        self.entries.push(ReportEntry {
            set: self.set.clone(),
            label: label.into(),
            value: value.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Accumulated reports for a whole run, with the export representations
/// the runner bundles into the output archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampSummary {
    pub reports: Vec<SetReport>,
}

impl CampSummary {
    pub fn push(&mut self, report: SetReport) {
        self.reports.push(report);
    }

    pub fn total_entries(&self) -> usize {
        self.reports.iter().map(SetReport::len).sum()
    }

    pub fn csv_output(&self) -> String {
        let mut lines = vec!["set,label,value".to_string()];
        for report in &self.reports {
            for entry in &report.entries {
                lines.push(format!(
                    "{},{},{}",
                    entry.set,
                    csv_escape(&entry.label),
                    csv_escape(&entry.value)
                ));
            }
        }
        lines.join("\n")
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_collects_entries() {
        let mut report = SetReport::new("dates");
        assert!(report.is_empty());
        report.push("course end", "2025-01-31");
        report.push("lesson end", "10:15");
        assert_eq!(report.len(), 2);
        assert_eq!(report.entries[0].set, "dates");
    }

    #[test]
    fn test_summary_csv_output() {
        let mut report = SetReport::new("text");
        report.push("slug", "rust-basics");
        report.push("tricky", "a,b");

        let mut summary = CampSummary::default();
        summary.push(report);

        let csv = summary.csv_output();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "set,label,value");
        assert_eq!(lines[1], "text,slug,rust-basics");
        assert_eq!(lines[2], "text,tricky,\"a,b\"");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = CampSummary::default();
        let mut a = SetReport::new("a");
        a.push("x", 1);
        let mut b = SetReport::new("b");
        b.push("y", 2);
        b.push("z", 3);
        summary.push(a);
        summary.push(b);
        assert_eq!(summary.total_entries(), 3);
    }
}
