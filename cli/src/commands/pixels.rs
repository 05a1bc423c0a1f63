use anyhow::{Result, ensure};
use censusraster::{PixelsConfig, build_pixels, is_contiguous};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::PixelsArgs) -> Result<()> {
    let shapefiles = &args.shapefiles.clone().unwrap_or("./shapefiles".into());
    let out_dir = &args.output.clone().unwrap_or(".".into());

    let mut config = PixelsConfig::new(args.unit, args.width, shapefiles, out_dir);
    if !args.states.is_empty() {
        for state in &args.states {
            ensure!(is_contiguous(state), "[pixels] state {state:?} is not a contiguous US state FIPS code");
        }
        config.states = args.states.clone();
    }

    println!("[pixels] rasterizing {} boundaries from {} at width {}", args.unit, shapefiles.display(), args.width);
    let stats = build_pixels(&config)?;

    println!("[pixels] {} units drawn, {} outside the contiguous US skipped", stats.included, stats.excluded);
    println!("[pixels] {} units smaller than a pixel, {} without vertices, {} off the raster",
        stats.fallback, stats.empty, stats.off_raster);
    println!("[pixels] {} pixels written to {}", stats.pixels, config.index_path().display());

    Ok(())
}
