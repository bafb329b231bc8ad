use chrono::NaiveDate;

use crate::Application;

/// Local archive name: `<application>-<YYYYMMDD>.zip`.
///
/// One name per application per UTC day, so a second run on the same day
/// replaces the earlier archive.
pub fn archive_file_name(application: Application, date: NaiveDate) -> String {
    format!("{}-{}.zip", application.slug(), date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_uses_compact_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(archive_file_name(Application::Jira, date), "jira-20240307.zip");
        assert_eq!(
            archive_file_name(Application::Confluence, date),
            "confluence-20240307.zip"
        );
    }
}
