use std::error::Error;

use clap::Parser;
use log::info;
use log::warn;
use log::LevelFilter;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use starforest::command_line_options::CommandLineOptions;
use starforest::error::ForestError;
use starforest::ics::sample_disk;
use starforest::parameters::GalaxyParameters;
use starforest::parameters::ParameterFileContents;
use starforest::parameters::TreeParameters;
use starforest::registry::Forest;
use starforest::store::MemoryStore;

fn log_level(verbosity: usize) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn read_parameters(
    opts: &CommandLineOptions,
) -> Result<(TreeParameters, GalaxyParameters), Box<dyn Error>> {
    let contents = match &opts.parameter_file_path {
        Some(path) => ParameterFileContents::read(path)?,
        None => ParameterFileContents::new(""),
    };
    for name in contents.get_section_names()? {
        if name != "tree" && name != "galaxy" {
            warn!("Ignoring unknown parameter section '{}'", name);
        }
    }
    let tree: TreeParameters = contents.section()?;
    let mut galaxy: GalaxyParameters = contents.section()?;
    if let Some(num_stars) = opts.num_stars {
        galaxy.num_stars = num_stars;
    }
    if let Some(seed) = opts.seed {
        galaxy.seed = seed;
    }
    Ok((tree, galaxy))
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = CommandLineOptions::parse();
    TermLogger::init(
        log_level(opts.verbosity),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    let (tree_parameters, galaxy_parameters) = read_parameters(&opts)?;
    let mut forest = Forest::new(MemoryStore::new());
    let stars = sample_disk(&galaxy_parameters);
    for _ in 0..tree_parameters.count {
        let tree = forest.create_tree(tree_parameters.width)?;
        let mut num_inserted = 0;
        for star in stars.iter() {
            match forest.insert(star.clone(), tree) {
                Ok(_) => num_inserted += 1,
                Err(
                    err @ (ForestError::Unseparable { .. } | ForestError::OutOfBounds { .. }),
                ) => warn!("Skipping star: {}", err),
                Err(err) => return Err(err.into()),
            }
        }
        let (mass, center_of_mass) = forest.update_mass_moments(tree)?;
        info!(
            "Tree {}: {} stars, total mass {:.3} at {}",
            tree, num_inserted, mass, center_of_mass
        );
        if !opts.no_render {
            println!("{}", forest.render(tree)?);
        }
    }
    Ok(())
}
