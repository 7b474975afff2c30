use std::io::Write;

use chrono::{DateTime, Utc};
use kyc::progress::VerificationProgress;
use kyc::{
    CountryKycAssignment, KycDetail, KycLevel, LoadedPage, PageOrigin, User, UserKycDetail,
    UserKycLevel,
};
use serde::Serialize;

use crate::error::ConsoleError;

/// A record that prints as one TSV row.
pub trait Tabular: Serialize {
    const COLUMNS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// Write a page: TSV with a header line, or one JSON object for the page.
pub fn write_page<T: Tabular, W: Write>(
    page: &LoadedPage<T>,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), ConsoleError> {
    if json_mode {
        serde_json::to_writer(&mut *writer, &page.response)?;
        writer.write_all(b"\n")?;
    } else {
        write_rows(&page.response.items, writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows<T: Tabular, W: Write>(items: &[T], writer: &mut W) -> Result<(), ConsoleError> {
    writeln!(writer, "{}", T::COLUMNS.join("\t"))?;
    for item in items {
        writeln!(writer, "{}", item.row().join("\t"))?;
    }
    Ok(())
}

/// Write a single record: `column<TAB>value` lines, or JSON.
pub fn write_record<T: Tabular, W: Write>(
    record: &T,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), ConsoleError> {
    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    } else {
        for (column, value) in T::COLUMNS.iter().zip(record.row()) {
            writeln!(writer, "{column}\t{value}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_progress<W: Write>(
    progress: &VerificationProgress,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), ConsoleError> {
    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, progress)?;
        writer.write_all(b"\n")?;
    } else {
        writeln!(writer, "level\tname\tstatus\tcomments")?;
        for l in &progress.levels {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                l.ordinal,
                l.name,
                l.status.label(),
                l.comments.as_deref().unwrap_or("")
            )?;
        }
        writeln!(
            writer,
            "# {}/{} approved ({}%), current level: {}",
            progress.approved,
            progress.total,
            progress.percent,
            progress.current_level.as_deref().unwrap_or("none")
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// One-line summary of where a page sits in the result set.
pub fn page_summary<T>(page: &LoadedPage<T>, current: u32) -> String {
    let origin = match page.origin {
        PageOrigin::Remote => "remote",
        PageOrigin::Fallback => "sample data",
    };
    format!(
        "page {current}/{} | {} total | {origin}",
        page.response.total_pages.max(1),
        page.response.total_count
    )
}

pub fn format_time(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn yes_no(b: bool) -> String {
    if b { "yes" } else { "no" }.to_string()
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

impl Tabular for KycLevel {
    const COLUMNS: &'static [&'static str] =
        &["id", "level", "name", "status", "active", "last_updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.level.to_string(),
            self.name.clone(),
            self.status.label().to_string(),
            yes_no(self.is_active),
            format_time(self.last_updated),
        ]
    }
}

impl Tabular for KycDetail {
    const COLUMNS: &'static [&'static str] =
        &["id", "level", "sequence", "name", "type", "required", "status"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.level
                .as_ref()
                .map_or_else(|| self.level_id.clone(), |l| l.name.clone()),
            self.sequence.map(|s| s.to_string()).unwrap_or_default(),
            self.name.clone(),
            self.field_type.clone(),
            yes_no(self.is_required),
            self.status.label().to_string(),
        ]
    }
}

impl Tabular for User {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "email", "country", "role", "status", "created_at"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            self.country.clone(),
            self.role.to_string(),
            self.status.label().to_string(),
            format_time(self.created_at),
        ]
    }
}

impl Tabular for UserKycLevel {
    const COLUMNS: &'static [&'static str] =
        &["id", "user", "level", "status", "submitted_at", "comments"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user
                .as_ref()
                .map_or_else(|| self.user_id.clone(), |u| u.email.clone()),
            self.level
                .as_ref()
                .map_or_else(|| self.level_id.clone(), |l| l.name.clone()),
            self.status.label().to_string(),
            format_time(self.submitted_at),
            self.comments.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for UserKycDetail {
    const COLUMNS: &'static [&'static str] = &["id", "user", "detail", "value", "status", "comments"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user_id.clone(),
            self.detail
                .as_ref()
                .map_or_else(|| self.detail_id.clone(), |d| d.name.clone()),
            self.value.clone().unwrap_or_default(),
            self.status.label().to_string(),
            self.comments.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for CountryKycAssignment {
    const COLUMNS: &'static [&'static str] =
        &["id", "country", "code", "level", "active", "status"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.country_name.clone(),
            self.country_code.clone(),
            self.level
                .as_ref()
                .map_or_else(|| self.level_id.clone(), |l| l.name.clone()),
            yes_no(self.is_active),
            self.status.label().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc::{run_query, samples, PaginationParams};

    fn levels_page() -> LoadedPage<KycLevel> {
        LoadedPage {
            response: run_query(&samples::kyc_levels(), &PaginationParams::new(1, 2)).unwrap(),
            origin: PageOrigin::Fallback,
        }
    }

    #[test]
    fn test_tsv_page_has_header_and_rows() {
        let mut out = Vec::new();
        write_page(&levels_page(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id\tlevel\tname\tstatus\tactive\tlast_updated");
        assert!(lines[1].starts_with("lvl-1\t1\tBasic\t"));
    }

    #[test]
    fn test_json_page_keeps_metadata() {
        let mut out = Vec::new();
        write_page(&levels_page(), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_count"], 4);
        assert_eq!(value["has_next"], true);
        assert_eq!(value["items"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_record_lines_pair_columns_and_values() {
        let users = samples::users();
        let mut out = Vec::new();
        write_record(&users[0], false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("email\talice.johnson@example.com\n"));
        assert!(text.contains("role\tadmin\n"));
    }

    #[test]
    fn test_page_summary() {
        assert_eq!(
            page_summary(&levels_page(), 1),
            "page 1/2 | 4 total | sample data"
        );
    }

    #[test]
    fn test_progress_tsv_footer() {
        let progress = kyc::progress::compute(
            "usr-1",
            &samples::kyc_levels(),
            &samples::user_kyc_levels(),
        );
        let mut out = Vec::new();
        write_progress(&progress, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("# 2/3 approved (66%), current level: lvl-3\n"));
    }
}
