use servo_pvm::motion::parse_cli;
use servo_pvm::TimeMotion;

fn main() {
    let (csvin, samples, svgout) = parse_cli();
    println!(
        "read data from {} and plot to {}",
        csvin.to_str().unwrap(),
        svgout.to_str().unwrap()
    );
    let mut tm = TimeMotion::from_csv(csvin);
    if let Some(samples) = samples {
        tm.truncate(samples);
    }
    tm.plot_motion(svgout).unwrap();
}
