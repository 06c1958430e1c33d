use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::analyzers::probability::{weighted_rain_rate, ProbabilityEngine, ProbabilityReport};
use crate::analyzers::statistics::{StatisticsEngine, StatisticsSummary};
use crate::error::{ProcessingError, Result};
use crate::models::CleanedRecord;
use crate::processors::categorizer::{Binning, CategorizedDataset, Categorizer};
use crate::writers::create_output;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_records: usize,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub temperature_bins: Option<Binning>,
    pub humidity_bins: Option<Binning>,
    /// `None` when there are fewer than two records.
    pub statistics: Option<StatisticsSummary>,
    pub probabilities: ProbabilityReport,
}

/// Runs categorization, statistics and probabilities over one cleaned dataset.
pub struct WeatherAnalyzer {
    categorizer: Categorizer,
    statistics: StatisticsEngine,
    probabilities: ProbabilityEngine,
}

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self {
            categorizer: Categorizer::new(),
            statistics: StatisticsEngine::new(),
            probabilities: ProbabilityEngine::new(),
        }
    }

    pub fn analyze_records(&self, records: &[CleanedRecord]) -> Result<AnalysisReport> {
        let dataset = self.categorizer.categorize(records);
        self.analyze(&dataset)
    }

    pub fn analyze(&self, dataset: &CategorizedDataset) -> Result<AnalysisReport> {
        let records = &dataset.records;

        let statistics = match self.statistics.analyze(records) {
            Ok(summary) => Some(summary),
            Err(ProcessingError::InsufficientData {
                variable, count, ..
            }) => {
                warn!(
                    "Descriptive statistics undefined: {} has only {} value(s)",
                    variable, count
                );
                None
            }
            Err(e) => return Err(e),
        };

        let probabilities = self.probabilities.compute(records);

        let date_range = match (records.first(), records.last()) {
            (Some(first), Some(last)) => Some((first.record.timestamp, last.record.timestamp)),
            _ => None,
        };

        info!("Analyzed {} records", records.len());

        Ok(AnalysisReport {
            total_records: records.len(),
            date_range,
            temperature_bins: dataset.temperature_bins,
            humidity_bins: dataset.humidity_bins,
            statistics,
            probabilities,
        })
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn format_bins(bins: &Option<Binning>) -> String {
    match bins {
        Some(b) => b.to_string(),
        None => "undefined (no records)".to_string(),
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "undefined".to_string(),
    }
}

impl AnalysisReport {
    pub fn summary(&self) -> String {
        let date_range = match self.date_range {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "no records".to_string(),
        };

        format!(
            "Records: {}\n\
            Date Range: {}\n\
            Temperature Bins: {}\n\
            Humidity Bins: {}",
            self.total_records,
            date_range,
            format_bins(&self.temperature_bins),
            format_bins(&self.humidity_bins)
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();

        out.push_str("\n\n=== Descriptive Statistics ===\n");
        match &self.statistics {
            Some(stats) => {
                out.push_str(&format!(
                    "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
                    "variable", "mean", "median", "mode", "std", "var", "p10", "p25", "p75", "p90", "iqr"
                ));
                for (variable, s) in &stats.variables {
                    out.push_str(&format!(
                        "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
                        variable.name(),
                        s.mean,
                        s.median,
                        s.mode,
                        s.std_dev,
                        s.variance,
                        s.p10,
                        s.p25,
                        s.p75,
                        s.p90,
                        s.iqr
                    ));
                }

                out.push_str("\n=== Correlation With Rain ===\n");
                for (variable, r) in stats.rain_correlations() {
                    out.push_str(&format!("{:<12} {}\n", variable.name(), format_optional(r)));
                }
            }
            None => out.push_str("undefined (fewer than 2 records)\n"),
        }

        let p = &self.probabilities;
        out.push_str("\n=== Rain Probabilities ===\n");
        out.push_str(&format!("P(rain)                        {}\n", p.rain));
        out.push_str(&format!(
            "P(rain | High humidity)        {}\n",
            p.rain_given_high_humidity
        ));
        out.push_str(&format!("P(rain | Cold)                 {}\n", p.rain_given_cold));
        out.push_str(&format!(
            "P(rain | High humidity, Cold)  {}\n",
            p.rain_given_high_humidity_and_cold
        ));
        out.push_str(&format!(
            "P(High humidity | rain)        {}\n",
            p.high_humidity_given_rain
        ));
        out.push_str(&format!(
            "  via Bayes' theorem           {}\n",
            format_optional(p.bayes_high_humidity_given_rain())
        ));

        out.push_str("\nBy temperature category:\n");
        for rate in &p.rain_by_temperature {
            out.push_str(&format!("  {:<10} {}\n", rate.category.to_string(), rate.rain));
        }
        out.push_str(&format!(
            "  weighted   {}\n",
            format_optional(weighted_rain_rate(&p.rain_by_temperature))
        ));

        out.push_str("By humidity category:\n");
        for rate in &p.rain_by_humidity {
            out.push_str(&format!("  {:<10} {}\n", rate.category.to_string(), rate.rain));
        }
        out.push_str(&format!(
            "  weighted   {}",
            format_optional(weighted_rain_rate(&p.rain_by_humidity))
        ));

        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_output(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!("Wrote analysis report to {}", path.display());
        Ok(())
    }
}
