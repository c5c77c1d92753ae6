//! Chart data for the report images.
//!
//! Charts are emitted as JSON descriptions (title, axes, bars, colours) that a
//! renderer turns into images.

use serde::{Deserialize, Serialize};

use datacap_analytics::{IssuancePoint, MilestoneHistogram};
use datacap_core::{Band, Milestone};

use crate::color::ColorSource;

/// Width of each milestone histogram.
pub const HISTOGRAM_WIDTH: u32 = 2000;

/// Width of the issuance chart.
pub const ISSUANCE_WIDTH: u32 = 3500;

/// One bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Category label.
    pub x: String,
    /// Height.
    pub y: u64,
}

/// A bar chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// Chart title.
    pub title: String,
    /// X-axis title.
    pub title_x_text: String,
    /// Y-axis title.
    pub title_y_text: String,
    /// Image width in pixels.
    pub width: u32,
    /// Category labels, in bar order.
    pub labels: Vec<String>,
    /// Bars.
    pub data: Vec<Bar>,
    /// One colour per bar.
    pub background_color: Vec<String>,
    /// Bar border width, when drawn.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub border_width: Option<u32>,
}

/// Histogram of one milestone over the elapsed-time bands.
pub fn milestone_chart(
    milestone: Milestone,
    histogram: &MilestoneHistogram,
    colors: &mut dyn ColorSource,
) -> BarChart {
    let key = milestone.key();
    let data: Vec<Bar> = histogram
        .counts(milestone)
        .iter()
        .map(|(band, count)| Bar {
            x: band.label().to_string(),
            y: count,
        })
        .collect();

    BarChart {
        title: format!("Deals made by clients until reached {key} Datacap allocation"),
        title_x_text: format!("Time from Datacap issuance to {key} Datacap allocation (hours)"),
        title_y_text: "Amount of deals made".to_string(),
        width: HISTOGRAM_WIDTH,
        labels: Band::labels().iter().map(|l| (*l).to_string()).collect(),
        background_color: colors.colors(data.len()),
        data,
        border_width: None,
    }
}

/// One histogram per milestone, first to full.
pub fn milestone_charts(
    histogram: &MilestoneHistogram,
    colors: &mut dyn ColorSource,
) -> Vec<BarChart> {
    Milestone::all()
        .iter()
        .map(|m| milestone_chart(*m, histogram, colors))
        .collect()
}

/// Datacap issued per day.
pub fn issuance_chart(series: &[IssuancePoint], colors: &mut dyn ColorSource) -> BarChart {
    let data: Vec<Bar> = series
        .iter()
        .map(|p| Bar {
            x: p.date.format("%Y-%m-%d").to_string(),
            y: p.total,
        })
        .collect();

    BarChart {
        title: "Size of Datacap issuance over time by client address ID".to_string(),
        title_x_text: "Date of Issuance".to_string(),
        title_y_text: "Size of Issuance".to_string(),
        width: ISSUANCE_WIDTH,
        labels: data.iter().map(|b| b.x.clone()).collect(),
        background_color: colors.colors(data.len()),
        data,
        border_width: Some(2),
    }
}
