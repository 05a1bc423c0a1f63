use anyhow::{Result, anyhow};
use censusraster::{AnalyzeConfig, Statistic, StatisticRun, analyze};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::AnalyzeArgs) -> Result<()> {
    let data_dir = &args.data.clone().unwrap_or(".".into());
    let out_dir = &args.output.clone().unwrap_or(".".into());

    let mut config = AnalyzeConfig::new(args.unit, args.width, data_dir, out_dir);
    if let Some(path) = &args.pixels { config.index = path.clone() }
    if let Some(path) = &args.demographics { config.demographics = path.clone() }
    if let Some(path) = &args.elections { config.elections = path.clone() }
    config.density_maps = args.density;

    if !args.statistics.is_empty() {
        config.runs = args.statistics.iter()
            .map(|name| {
                let statistic = Statistic::parse(name, args.unit)
                    .ok_or_else(|| anyhow!("[analyze] unknown statistic {name:?}"))?;
                Ok(StatisticRun::new(statistic, args.fraction, name.trim()))
            })
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(threshold) = args.median_income {
        for run in &mut config.runs {
            if let Statistic::IncomeBelow(_) = run.statistic { run.statistic = Statistic::IncomeBelow(threshold) }
        }
    }

    let report = analyze(&config)?;

    println!("{} {} count", report.units, report.unit);
    println!("{} pixels", report.pixels);
    for statistic in &report.statistics {
        println!();
        for line in statistic.summary() {
            println!("{line}");
        }
    }

    Ok(())
}
