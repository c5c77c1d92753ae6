//! Small text formatting helpers.

use datacap_core::ClientId;

/// Emoji marking clients flagged for receiving datacap from several verifiers.
pub const WARNING_MARK: &str = "⚠️";

/// Human-readable elapsed time.
///
/// Whole hours below 48 hours (`"30 hours"`), whole days from there on
/// (`"3 days"`). Both truncate toward zero.
#[must_use]
pub fn format_time_diff(hours: f64) -> String {
    let whole_hours = hours.trunc() as i64;
    if whole_hours >= 48 {
        let days = (hours / 24.0).trunc() as i64;
        return format!("{days} days");
    }
    format!("{whole_hours} hours")
}

/// Client id, linked to its audit trail when one exists.
#[must_use]
pub fn client_id_cell(client_id: &ClientId, audit_trail: Option<&str>) -> String {
    match audit_trail {
        Some(url) => format!("[{client_id}]({url})"),
        None => client_id.to_string(),
    }
}

/// Link to a client's storage-provider interactions on Filecoin Pulse.
#[must_use]
pub fn pulse_link(base_url: &str, client_id: &ClientId) -> String {
    format!(
        "{}/client/{client_id}/#client-interactions-with-storage-providers",
        base_url.trim_end_matches('/')
    )
}
