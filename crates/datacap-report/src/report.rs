//! Compliance report assembly.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

use log::{debug, info};
use serde::Serialize;

use datacap_analytics::{
    analyze_consumption, daily_issuance, progression_rows, ConsumptionAnalysis,
};
use datacap_core::traits::{AllocationSource, DealSource};
use datacap_core::{ClientAllocationTimeline, ClientDealTimeline, ClientId};
use datacap_ext_file::{JsonClientSource, VerifiedClient};

use crate::chart::{issuance_chart, milestone_charts, BarChart};
use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::markdown::{
    client_table, flagged_note, progression_table, query_limit_warning, DISTRIBUTION_HEADING,
    NO_DATACAP, REPORT_TITLE,
};

impl From<Infallible> for ReportError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// Everything known about one verifier's clients.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    /// Verifier address id; names the output directory.
    pub verifier: String,
    /// Listed clients, in source order.
    pub clients: Vec<VerifiedClient>,
    /// Number of clients the verifier has, possibly more than listed.
    pub total_clients: u64,
    /// Allocation timelines of the listed clients.
    pub allocations: BTreeMap<ClientId, ClientAllocationTimeline>,
    /// Deal timelines of the listed clients.
    pub deals: BTreeMap<ClientId, ClientDealTimeline>,
    /// Clients that received datacap from more than one verifier.
    pub flagged: BTreeSet<ClientId>,
    /// Audit-trail links by client.
    pub audit_trails: BTreeMap<ClientId, String>,
}

impl ReportData {
    /// Loads allocations from `clients` and the matching deals from `deals`.
    ///
    /// # Errors
    ///
    /// Propagates source and validation errors.
    pub fn load<D>(
        verifier: impl Into<String>,
        clients: &JsonClientSource,
        deals: &D,
    ) -> ReportResult<Self>
    where
        D: DealSource,
        ReportError: From<D::Error>,
    {
        let allocations = clients.allocation_timelines()?;
        let ids = clients.client_ids()?;
        let deals = deals.deal_timelines(&ids)?;

        Ok(Self {
            verifier: verifier.into(),
            clients: clients.clients().to_vec(),
            total_clients: clients.total_count(),
            allocations,
            deals,
            flagged: BTreeSet::new(),
            audit_trails: BTreeMap::new(),
        })
    }

    /// Sets the flagged clients.
    #[must_use]
    pub fn with_flagged(mut self, flagged: BTreeSet<ClientId>) -> Self {
        self.flagged = flagged;
        self
    }

    /// Sets the audit-trail links.
    #[must_use]
    pub fn with_audit_trails(mut self, audit_trails: BTreeMap<ClientId, String>) -> Self {
        self.audit_trails = audit_trails;
        self
    }

    fn has_flagged_client(&self) -> bool {
        self.clients
            .iter()
            .filter_map(|c| c.client_id().ok())
            .any(|id| self.flagged.contains(&id))
    }
}

/// A rendered report and its chart data.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    /// Verifier address id.
    pub verifier: String,
    /// Markdown document.
    pub markdown: String,
    /// One histogram per milestone; empty when the verifier has no clients.
    pub histogram_charts: Vec<BarChart>,
    /// Issuance over time; absent when the verifier has no clients.
    pub issuance_chart: Option<BarChart>,
    /// Tracking results behind the histograms.
    pub analysis: ConsumptionAnalysis,
}

impl ComplianceReport {
    /// True when the report only states that no datacap was issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issuance_chart.is_none()
    }
}

/// Builds the compliance report for one verifier.
///
/// # Errors
///
/// Propagates validation errors from tracking and from client rows.
pub fn build_report(data: &ReportData, config: &ReportConfig) -> ReportResult<ComplianceReport> {
    let mut content = vec![REPORT_TITLE.to_string()];

    if data.total_clients == 0 {
        info!("No datacap issued by verifier {}", data.verifier);
        content.push(NO_DATACAP.to_string());
        return Ok(ComplianceReport {
            verifier: data.verifier.clone(),
            markdown: content.join("\n"),
            histogram_charts: Vec::new(),
            issuance_chart: None,
            analysis: ConsumptionAnalysis::default(),
        });
    }

    let analysis = analyze_consumption(&data.allocations, &data.deals, &config.analytics)?;
    debug!(
        "Verifier {}: {} allocations tracked, {} fully used",
        data.verifier,
        analysis.allocation_count(),
        analysis.completed_count()
    );

    let mut colors = config.color_source();
    let histogram_charts = milestone_charts(&analysis.histogram, colors.as_mut());
    let issuance = daily_issuance(data.allocations.values().flat_map(|t| t.iter()));
    let issuance_chart = issuance_chart(&issuance, colors.as_mut());

    content.push(DISTRIBUTION_HEADING.to_string());
    content.push(String::new());
    let rows = progression_rows(data.allocations.values());
    content.push(progression_table(&rows, &data.audit_trails));
    content.push(String::new());

    content.push(client_table(
        &data.clients,
        &data.flagged,
        &data.audit_trails,
        &config.pulse_base_url,
    )?);
    content.push(String::new());

    if data.has_flagged_client() {
        content.push(flagged_note());
        content.push(String::new());
    }

    if data.total_clients > config.clients_query_limit {
        content.push(query_limit_warning(config.clients_query_limit));
    }

    Ok(ComplianceReport {
        verifier: data.verifier.clone(),
        markdown: content.join("\n"),
        histogram_charts,
        issuance_chart: Some(issuance_chart),
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use datacap_core::timeline::{group_allocations, group_deals};
    use datacap_core::{Allocation, Band, Deal, Milestone, Timestamp};
    use datacap_ext_file::{AllowanceEntry, JsonAmount};

    const HOUR: i64 = 3_600;

    fn verified(id: &str, grants: &[(u64, i64)]) -> VerifiedClient {
        VerifiedClient {
            address_id: id.to_string(),
            address: None,
            name: Some(format!("Client {id}")),
            allowance_array: grants
                .iter()
                .map(|(size, at)| AllowanceEntry {
                    allowance: JsonAmount::Unsigned(*size),
                    create_message_timestamp: *at,
                })
                .collect(),
            cid_report_url: None,
        }
    }

    fn data() -> ReportData {
        let clients = vec![verified("f01", &[(100, 0), (150, 10)])];
        let allocations = group_allocations(vec![
            Allocation::new(ClientId::new("f01"), 100, Timestamp::from_secs(0)),
            Allocation::new(ClientId::new("f01"), 150, Timestamp::from_secs(10)),
        ]);
        let deals = group_deals(vec![
            Deal::new(ClientId::new("f01"), 30, Timestamp::from_secs(2 * HOUR)),
            Deal::new(ClientId::new("f01"), 80, Timestamp::from_secs(30 * HOUR)),
        ]);
        ReportData {
            verifier: "f0100".to_string(),
            clients,
            total_clients: 1,
            allocations,
            deals,
            ..ReportData::default()
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let report = build_report(&data(), &ReportConfig::default()).unwrap();
        let md = &report.markdown;

        let title = md.find(REPORT_TITLE).unwrap();
        let dist = md.find(DISTRIBUTION_HEADING).unwrap();
        let list = md.find("## List of clients").unwrap();
        assert!(title < dist && dist < list);
        assert!(md.contains("| f01 | 100 B | 150 B (150%) | - | - |"));
        assert!(!md.contains("flag received datacap"));
        assert!(!md.contains("There are more than"));

        assert_eq!(report.histogram_charts.len(), 5);
        assert!(!report.is_empty());
        assert_eq!(
            report.analysis.histogram.get(Milestone::First, Band::OneToTwelve),
            1
        );
    }

    #[test]
    fn test_flagged_and_limit_notes() {
        let data = data()
            .with_flagged([ClientId::new("f01")].into_iter().collect())
            .with_audit_trails(
                [(ClientId::new("f01"), "https://example.org/t".to_string())]
                    .into_iter()
                    .collect(),
            );
        let data = ReportData {
            total_clients: 21,
            ..data
        };
        let report = build_report(&data, &ReportConfig::default()).unwrap();
        let md = &report.markdown;

        assert!(md.contains("| ⚠️ [f01](https://example.org/t) | Client f01 |"));
        assert!(md.contains(&flagged_note()));
        assert!(md.ends_with(&query_limit_warning(20)));
    }

    #[test]
    fn test_no_clients() {
        let data = ReportData {
            verifier: "f0100".to_string(),
            ..ReportData::default()
        };
        let report = build_report(&data, &ReportConfig::default()).unwrap();
        assert_eq!(
            report.markdown,
            "# Compliance Report\n### No Datacap issued for verifier"
        );
        assert!(report.is_empty());
        assert!(report.histogram_charts.is_empty());
    }

    #[test]
    fn test_load_from_in_memory_deals() {
        let clients = JsonClientSource::from_clients(vec![verified("f01", &[(100, 0)])]);
        let deals = vec![
            Deal::new(ClientId::new("f01"), 100, Timestamp::from_secs(HOUR)),
            Deal::new(ClientId::new("f02"), 100, Timestamp::from_secs(HOUR)),
        ];
        let data = ReportData::load("f0100", &clients, &deals).unwrap();
        assert_eq!(data.deals.len(), 1);
        assert_eq!(data.total_clients, 1);
    }
}
