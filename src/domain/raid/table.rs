//! Presentation-view table rendering for the RAID register.

use super::record::RaidRecord;

/// Renders the record sequence as a markdown table.
///
/// Empty mitigation and owner cells render as `-`. The output is plain data
/// for a display surface; nothing here mutates the records.
pub fn render_table(records: &[RaidRecord]) -> String {
    let mut out = String::from(
        "| Type | Description | Severity | Probability | Mitigation | Owner | Status |\n\
         |------|-------------|----------|-------------|------------|-------|--------|\n",
    );

    for record in records {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            record.kind,
            cell(&record.description),
            record.severity,
            record.probability,
            cell(&record.mitigation),
            cell(&record.owner),
            record.status,
        ));
    }

    out
}

/// Escapes pipes and substitutes `-` for empty values.
fn cell(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.replace('|', "\\|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raid::{RaidLevel, RaidStatus, RaidType};

    #[test]
    fn renders_header_for_empty_register() {
        let table = render_table(&[]);
        assert!(table.starts_with("| Type | Description |"));
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn renders_one_row_per_record() {
        let records = vec![
            RaidRecord {
                id: 1,
                kind: RaidType::Risk,
                description: "Vendor delay".to_string(),
                severity: RaidLevel::High,
                probability: RaidLevel::Medium,
                mitigation: "Weekly checkpoints".to_string(),
                owner: "Dana".to_string(),
                status: RaidStatus::Open,
            },
            RaidRecord::blank(2, RaidType::Dependency),
        ];

        let table = render_table(&records);

        assert!(table.contains("| Risk | Vendor delay | High | Medium | Weekly checkpoints | Dana | Open |"));
        assert!(table.contains("| Dependency | - | Medium | Medium | - | - | Open |"));
    }

    #[test]
    fn escapes_pipes_in_text_fields() {
        let mut record = RaidRecord::blank(1, RaidType::Issue);
        record.description = "a | b".to_string();

        let table = render_table(&[record]);
        assert!(table.contains("a \\| b"));
    }
}
