pub mod probability;
pub mod statistics;
pub mod weather_analyzer;

pub use probability::{CategoryRate, Estimate, ProbabilityEngine, ProbabilityReport};
pub use statistics::{CorrelationMatrix, DescriptiveStatistics, StatisticsEngine, StatisticsSummary};
pub use weather_analyzer::{AnalysisReport, WeatherAnalyzer};
