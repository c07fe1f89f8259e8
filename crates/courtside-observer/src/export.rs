//! CSV rendering of the end-of-game player report.
//!
//! The file has one header row and one row per player. Plus/minus is
//! written as a plain integer; the `+` sign is only used on screen.
//!
//! ```text
//! Player,+/-,Possessions Played
//! Jordan,4,12
//! Pippen,-2,9
//! ```

use courtside_types::BoxScoreRow;

use crate::error::ObserverError;

/// File name offered to the browser for the CSV download.
pub const REPORT_FILE_NAME: &str = "plus_minus_report.csv";

/// Column headers, in order.
pub const REPORT_HEADER: [&str; 3] = ["Player", "+/-", "Possessions Played"];

/// Render report rows as CSV text.
///
/// # Errors
///
/// Returns [`ObserverError::Csv`] if a record cannot be written, or
/// [`ObserverError::Internal`] if the buffer cannot be finalised.
pub fn render_report_csv(rows: &[BoxScoreRow]) -> Result<String, ObserverError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_HEADER)?;

    for row in rows {
        let plus_minus = row.plus_minus.to_string();
        let possessions = row.possessions_played.to_string();
        writer.write_record([row.player.as_str(), plus_minus.as_str(), possessions.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ObserverError::Internal(format!("failed to flush CSV report: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ObserverError::Internal(format!("CSV report is not UTF-8: {e}")))
}
