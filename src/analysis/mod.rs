mod apportion;
mod coverage;
mod data;
mod distortion;
mod report;
mod statistic;

pub use apportion::{PixelShares, apportion, apportion_with};
pub use coverage::{CoverageReport, HotMap, RankEntry, Ranking, coverage_report, hot_map, rank};
pub use data::{Dataset, Demographics, ElectionRecord, Elections};
pub use distortion::{Distortion, distortion, statistic_distortion};
pub use report::{AnalysisReport, StatisticReport, percent};
pub use statistic::{Statistic, StatisticRun, default_runs};
