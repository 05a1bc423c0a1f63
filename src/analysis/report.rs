use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::map::GeoType;
use super::{CoverageReport, Distortion};

/// A ratio as a percentage rounded to one decimal place. Only used for presentation.
#[inline]
pub fn percent(ratio: f64) -> f64 { (ratio * 1000.0).round() / 10.0 }

/// Everything computed for one statistic run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticReport {
    pub name: String, // output file stem
    pub title: String,
    pub distortion: Option<Distortion>,
    pub coverage: CoverageReport,
}

impl StatisticReport {
    /// Human-readable summary, one fact per line.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        if let Some(d) = &self.distortion {
            lines.push(format!("population % {}", percent(d.population_ratio)));
            lines.push(format!("pixels % {}", percent(d.pixel_ratio)));
            lines.push(format!("(total population {} ; total pixels {} )",
                d.total_population.round() as i64, d.total_pixels.round() as i64));
        }
        let c = &self.coverage;
        lines.push(format!("total population units {}", c.total_value.round() as i64));
        lines.push(format!("total displayed population units {} {}",
            c.highlighted_value.round() as i64, c.population_percent().unwrap_or(0.0)));
        lines.push(format!("total pixels {}", c.total_pixels));
        lines.push(format!("total displayed population pixels {} {}",
            c.highlighted_pixels.round() as i64, c.map_percent().unwrap_or(0.0)));
        lines
    }
}

/// All statistics for one unit kind and raster width, written as `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub unit: GeoType,
    pub width: u32,
    pub units: usize,  // units with residents and pixels
    pub pixels: usize, // pixels with residents
    pub statistics: Vec<StatisticReport>,
}

impl AnalysisReport {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("[analysis::report] Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("[analysis::report] Failed to write report to {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(0.5), 50.0);
        assert_eq!(percent(0.12345), 12.3);
        assert_eq!(percent(0.99999), 100.0);
        assert_eq!(percent(0.0), 0.0);
    }

    #[test]
    fn summary_includes_distortion_only_when_present() {
        let coverage = CoverageReport {
            title: "in poverty".into(),
            fraction: 0.95,
            total_value: 200.0,
            highlighted_value: 190.0,
            highlighted_units: 3,
            total_pixels: 10,
            highlighted_pixels: 2.5,
        };
        let mut report = StatisticReport { name: "poverty".into(), title: "in poverty".into(), distortion: None, coverage };
        assert_eq!(report.summary().len(), 5);

        report.distortion = Some(Distortion {
            population_ratio: 0.15, pixel_ratio: 0.12, total_population: 1000.0, total_pixels: 10.0, units: 3,
        });
        let summary = report.summary();
        assert_eq!(summary.len(), 8);
        assert_eq!(summary[1], "population % 15");
        assert_eq!(summary[7], "total displayed population pixels 3 25");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = AnalysisReport { unit: GeoType::Tract, width: 800, units: 0, pixels: 0, statistics: vec![] };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let value: serde_json::Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["unit"], "tract");
        assert_eq!(value["width"], 800);
    }
}
