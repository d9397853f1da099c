use serde::{Deserialize, Serialize};

/// Number of buckets every metric is classified into.
pub const NUM_BUCKETS: usize = 7;

/// Sequential ramp (inferno), shared by every metric, lowest bucket first.
pub const RAMP: [&str; NUM_BUCKETS] = [
    "#000004", "#33095e", "#781c6d", "#bb3754", "#ed6925", "#fcb519", "#fcffa4",
];

/// Demographic density fields carried by each census tract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Pop,
    Vap,
    Bvap,
    PropBvap,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Pop, Metric::Vap, Metric::Bvap, Metric::PropBvap];

    /// Property name in the tract dataset.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Pop => "Pop_Dens",
            Metric::Vap => "VAP_Dens",
            Metric::Bvap => "BVAP_Dens",
            Metric::PropBvap => "Perc_BVAP",
        }
    }

    /// Name of the base layer in the layer control.
    pub fn layer_name(&self) -> &'static str {
        match self {
            Metric::Pop => "POP / sq. mi",
            Metric::Vap => "VAP / sq. mi",
            Metric::Bvap => "BVAP / sq. mi",
            Metric::PropBvap => "Prop BVAP",
        }
    }

    /// Long label, used by tooltips and legend titles.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Pop => "POP / square mi",
            Metric::Vap => "VAP / square mi",
            Metric::Bvap => "BVAP / square mi",
            Metric::PropBvap => "Proportion BVAP",
        }
    }

    /// Decimal places kept when the raw value is rounded.
    pub fn decimals(&self) -> i32 {
        match self {
            Metric::PropBvap => 3,
            _ => 0,
        }
    }

    /// Decimal places shown in the legend.
    pub fn legend_decimals(&self) -> usize {
        match self {
            Metric::PropBvap => 2,
            _ => 0,
        }
    }

    pub fn default_scale(&self) -> MetricScale {
        match self {
            Metric::Pop | Metric::Vap => MetricScale {
                thresholds: [0.0, 500.0, 1000.0, 2000.0, 3000.0, 5000.0, 10000.0],
                legend_max: 50000.0,
            },
            Metric::Bvap => MetricScale {
                thresholds: [0.0, 200.0, 500.0, 1000.0, 1500.0, 2500.0, 5000.0],
                legend_max: 15000.0,
            },
            Metric::PropBvap => MetricScale {
                thresholds: [0.0, 0.25, 0.4, 0.5, 0.6, 0.75, 0.9],
                legend_max: 1.0,
            },
        }
    }

    /// Round a raw value half-to-even at this metric's precision.
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals());
        (value * factor).round_ties_even() / factor
    }
}

/// Fixed bucket edges for one metric.
///
/// Ranges are inclusive at both ends, so adjacent buckets share an edge; the
/// ascending first-match in [`MetricScale::classify`] settles ties downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScale {
    pub thresholds: [f64; NUM_BUCKETS],
    /// Upper end printed for the last bucket in the legend.
    pub legend_max: f64,
}

impl MetricScale {
    /// Index of the first bucket `i` with `t[i] <= value <= t[i+1]`, or the
    /// last bucket when none matches (above range, below range, or NaN).
    pub fn classify(&self, value: f64) -> usize {
        let t = &self.thresholds;
        (0..NUM_BUCKETS - 1)
            .find(|&i| t[i] <= value && value <= t[i + 1])
            .unwrap_or(NUM_BUCKETS - 1)
    }

    /// Ramp color for a value.
    pub fn color(&self, value: f64) -> &'static str {
        RAMP[self.classify(value)]
    }

    /// Legend row labels, e.g. "0 - 500", ..., "10000 - 50000".
    pub fn legend_labels(&self, decimals: usize) -> Vec<String> {
        let t = &self.thresholds;
        (0..NUM_BUCKETS)
            .map(|i| {
                let hi = if i + 1 < NUM_BUCKETS { t[i + 1] } else { self.legend_max };
                format!("{:.prec$} - {:.prec$}", t[i], hi, prec = decimals)
            })
            .collect()
    }
}
