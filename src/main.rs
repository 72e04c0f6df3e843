use clap::{App, Arg, ArgMatches};
use mdsite::build::{build_site, Result};
use mdsite::config::Config;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("base-path")
                .value_name("BASE_PATH")
                .help("Prefix for root-relative links, e.g. `/my-site/` (overrides `base_path`)")
                .index(1),
        )
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory in which to start searching for `mdsite.yaml`"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("DIR")
                .takes_value(true)
                .help("Output directory (overrides `output_directory`)"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let project = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let mut config = Config::from_directory(&project)?;
    if let Some(base_path) = matches.value_of("base-path") {
        config.base_path = base_path.to_owned();
    }
    if let Some(output) = matches.value_of("output") {
        config.output_directory = PathBuf::from(output);
    }
    build_site(&config)?;
    Ok(())
}
