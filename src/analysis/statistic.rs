use crate::{config::{MEDIAN_INCOME_COUNTY, MEDIAN_INCOME_TRACT}, map::{GeoId, GeoType}};
use super::Dataset;

/// A demographic statistic: a numerator count and (optionally) the population it is a share of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    AllPeople,
    NonWhite,
    PublicTransit,
    IncomeBelow(f64), // household median income threshold in dollars
    Poverty,
    MultiUnitHousing,
    VotedObama,
    VotedRomney,
}

impl Statistic {
    /// Human-readable title, used in reports and map legends.
    pub fn title(&self) -> String {
        match self {
            Statistic::AllPeople => "all people".to_string(),
            Statistic::NonWhite => "non-whites".to_string(),
            Statistic::PublicTransit => "use public transit".to_string(),
            Statistic::IncomeBelow(threshold) => format!("household income < ${}", threshold.round() as i64),
            Statistic::Poverty => "in poverty".to_string(),
            Statistic::MultiUnitHousing => "multi-unit housing structures".to_string(),
            Statistic::VotedObama => "voted for Obama in 2012".to_string(),
            Statistic::VotedRomney => "voted for Romney in 2012".to_string(),
        }
    }

    /// Whether the statistic is a share of some population, so distortion is meaningful.
    #[inline]
    pub fn has_denominator(&self) -> bool { !matches!(self, Statistic::AllPeople) }

    /// Whether the statistic reads the election table.
    #[inline]
    pub fn needs_elections(&self) -> bool { matches!(self, Statistic::VotedObama | Statistic::VotedRomney) }

    /// Count of people (or workers, households...) with the attribute.
    pub fn numerator(&self, data: &Dataset, geo_id: &GeoId) -> Option<f64> {
        let demo = &data.demographics;
        match self {
            Statistic::AllPeople => demo.population(geo_id),
            Statistic::NonWhite => Some(demo.population(geo_id)? - demo.get(geo_id, "white")?),
            Statistic::PublicTransit => demo.get(geo_id, "public_transit"),
            // An unknown income counts as above the threshold; the unit stays in the total.
            Statistic::IncomeBelow(threshold) => match demo.get(geo_id, "median_income") {
                Some(income) if income <= *threshold => demo.population(geo_id),
                _ => Some(0.0),
            },
            Statistic::Poverty => demo.get(geo_id, "in_poverty"),
            Statistic::MultiUnitHousing => Some(
                demo.get(geo_id, "housing_units")? - demo.get(geo_id, "housing_units_single_detached")?
            ),
            // County percentages are apportioned to tracts by population.
            Statistic::VotedObama => {
                let pct = data.elections.as_ref()?.get(geo_id)?.pct_obama?;
                Some(pct / 100.0 * demo.population(geo_id)?)
            }
            Statistic::VotedRomney => {
                let pct = data.elections.as_ref()?.get(geo_id)?.pct_romney?;
                Some(pct / 100.0 * demo.population(geo_id)?)
            }
        }
    }

    /// Size of the population the numerator is drawn from.
    pub fn denominator(&self, data: &Dataset, geo_id: &GeoId) -> Option<f64> {
        let demo = &data.demographics;
        match self {
            Statistic::PublicTransit => demo.get(geo_id, "all_workers"),
            Statistic::Poverty => demo.get(geo_id, "poverty_status_denominator"),
            Statistic::MultiUnitHousing => demo.get(geo_id, "housing_units"),
            Statistic::AllPeople
            | Statistic::NonWhite
            | Statistic::IncomeBelow(_)
            | Statistic::VotedObama
            | Statistic::VotedRomney => demo.population(geo_id),
        }
    }

    /// Parse a statistic name as accepted on the command line.
    pub fn parse(name: &str, ty: GeoType) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "all" | "population" => Statistic::AllPeople,
            "non_white" | "non-white" | "nonwhite" => Statistic::NonWhite,
            "public_transit" | "transit" => Statistic::PublicTransit,
            "income" => Statistic::IncomeBelow(median_income(ty)),
            "poverty" => Statistic::Poverty,
            "multi_unit_housing" | "housing" => Statistic::MultiUnitHousing,
            "obama" => Statistic::VotedObama,
            "romney" => Statistic::VotedRomney,
            _ => return None,
        })
    }
}

/// Income threshold that splits the population of `ty` units in half.
#[inline]
pub fn median_income(ty: GeoType) -> f64 {
    match ty {
        GeoType::Tract => MEDIAN_INCOME_TRACT,
        GeoType::County => MEDIAN_INCOME_COUNTY,
    }
}

/// One statistic to analyze, with the population fraction to highlight and the output file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticRun {
    pub statistic: Statistic,
    pub fraction: f64,
    pub file_stem: String,
}

impl StatisticRun {
    pub fn new(statistic: Statistic, fraction: f64, file_stem: &str) -> Self {
        Self { statistic, fraction, file_stem: file_stem.to_string() }
    }
}

/// The standard set of maps: where 50/95/99% of people live, then each demographic at 95%.
pub fn default_runs(ty: GeoType) -> Vec<StatisticRun> {
    vec![
        StatisticRun::new(Statistic::AllPeople, 0.50, "all_50"),
        StatisticRun::new(Statistic::AllPeople, 0.95, "all_95"),
        StatisticRun::new(Statistic::AllPeople, 0.99, "all_99"),
        StatisticRun::new(Statistic::NonWhite, 0.95, "non_whites"),
        StatisticRun::new(Statistic::PublicTransit, 0.95, "public_transit"),
        StatisticRun::new(Statistic::IncomeBelow(median_income(ty)), 0.95, "income"),
        StatisticRun::new(Statistic::Poverty, 0.95, "poverty"),
        StatisticRun::new(Statistic::MultiUnitHousing, 0.95, "multi_unit_homes"),
        StatisticRun::new(Statistic::VotedObama, 0.95, "obama"),
        StatisticRun::new(Statistic::VotedRomney, 0.95, "romney"),
    ]
}
