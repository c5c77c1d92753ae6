//! Markdown sections of the compliance report.

use std::collections::{BTreeMap, BTreeSet};

use datacap_analytics::AllocationProgressionRow;
use datacap_core::units::format_iec_bytes;
use datacap_core::{ClientId, DatacapResult};
use datacap_ext_file::VerifiedClient;

use crate::format::{client_id_cell, pulse_link, WARNING_MARK};

/// Report title.
pub const REPORT_TITLE: &str = "# Compliance Report";

/// Heading of the progression section.
pub const DISTRIBUTION_HEADING: &str = "## Distribution of Datacap in Clients";

/// Sentence introducing the progression table.
pub const PROGRESSION_INTRO: &str = "The table below shows the allocations for each client. The percentage next to each allocation represents the increase or decrease compared to the previous allocation.";

/// Heading of the client list.
pub const CLIENT_LIST_HEADING: &str = "## List of clients and their allocations";

/// Body of a report for a verifier without clients.
pub const NO_DATACAP: &str = "### No Datacap issued for verifier";

const EMPTY_CELL: &str = "-";

/// Escapes characters that would break a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Renders one progression row.
#[must_use]
pub fn progression_line(row: &AllocationProgressionRow, audit_trail: Option<&str>) -> String {
    let cells: Vec<&str> = row
        .display_cells
        .iter()
        .map(|c| c.as_deref().unwrap_or(EMPTY_CELL))
        .collect();
    let remaining = if row.remaining_sizes.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        row.remaining_sizes.join(", ")
    };
    format!(
        "| {} | {} | {} |",
        client_id_cell(&row.client_id, audit_trail),
        cells.join(" | "),
        remaining
    )
}

/// Renders the progression table with its introduction.
#[must_use]
pub fn progression_table(
    rows: &[AllocationProgressionRow],
    audit_trails: &BTreeMap<ClientId, String>,
) -> String {
    let mut lines = vec![
        PROGRESSION_INTRO.to_string(),
        String::new(),
        "| ID | First Allocation | Second Allocation | Third Allocation | Remaining Allocations |"
            .to_string(),
        "|-|-|-|-|-|".to_string(),
    ];
    lines.extend(rows.iter().map(|row| {
        progression_line(row, audit_trails.get(&row.client_id).map(String::as_str))
    }));
    lines.join("\n")
}

/// Renders one client-list row.
///
/// # Errors
///
/// Fails on a blank id or an invalid allowance.
pub fn client_line(
    client: &VerifiedClient,
    flagged: &BTreeSet<ClientId>,
    audit_trails: &BTreeMap<ClientId, String>,
    pulse_base_url: &str,
) -> DatacapResult<String> {
    let client_id = client.client_id()?;
    let id_cell = client_id_cell(&client_id, audit_trails.get(&client_id).map(String::as_str));
    let id_cell = if flagged.contains(&client_id) {
        format!("{WARNING_MARK} {id_cell}")
    } else {
        id_cell
    };
    let name = client
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| EMPTY_CELL.to_string(), escape_cell);
    let cid_report = client
        .cid_report_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(EMPTY_CELL);

    Ok(format!(
        "| {id_cell} | {name} | {} | {} | [Filecoin Pulse]({}) | {cid_report} |",
        client.allocation_count(),
        format_iec_bytes(client.total_allowance()?),
        pulse_link(pulse_base_url, &client_id),
    ))
}

/// Renders the client list table.
///
/// # Errors
///
/// See [`client_line`].
pub fn client_table(
    clients: &[VerifiedClient],
    flagged: &BTreeSet<ClientId>,
    audit_trails: &BTreeMap<ClientId, String>,
    pulse_base_url: &str,
) -> DatacapResult<String> {
    let mut lines = vec![
        CLIENT_LIST_HEADING.to_string(),
        String::new(),
        "| ID | Name | Number of Allocations | Total Allocations | Client Interactions | CID Report |"
            .to_string(),
        "|-|-|-|-|-|-|".to_string(),
    ];
    for client in clients {
        lines.push(client_line(client, flagged, audit_trails, pulse_base_url)?);
    }
    Ok(lines.join("\n"))
}

/// Note explaining the warning mark.
#[must_use]
pub fn flagged_note() -> String {
    format!("### Clients with {WARNING_MARK} flag received datacap from more than one verifier")
}

/// Warning shown when the client list was truncated.
#[must_use]
pub fn query_limit_warning(limit: u64) -> String {
    format!(
        "## {WARNING_MARK} There are more than {limit} clients for a given allocator, report may be inaccurate"
    )
}
