use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the position line chart.
pub fn parse_cli() -> (PathBuf, Option<usize>, PathBuf) {
    let arg_csvin = Arg::with_name("csvfile")
        .help("csv file with the time and position samples")
        .required(true)
        .index(1);
    let arg_samples = Arg::with_name("samples")
        .help("keep only the first SAMPLES rows of the csv file")
        .index(2);
    let arg_svgout = Arg::with_name("svgfile")
        .help("name of the output svg file")
        .short("o")
        .long("svgfile")
        .takes_value(true);
    let cli_args = App::new("servo_position")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the position line chart with the sampling jitter summary")
        .arg(arg_csvin)
        .arg(arg_samples)
        .arg(arg_svgout)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("csvfile").unwrap_or_default());
    let samples = cli_args
        .value_of("samples")
        .map(|s| s.parse::<usize>().unwrap());
    let svgout = match cli_args.value_of("svgfile") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut svgout = csvin.clone();
            svgout.set_extension("svg");
            svgout
        }
    };
    return (csvin, samples, svgout);
}
