use servo_pvm::position::parse_cli;
use servo_pvm::TimeValue;

fn main() {
    let (csvin, samples, svgout) = parse_cli();
    println!(
        "read data from {} and plot to {}",
        csvin.to_str().unwrap(),
        svgout.to_str().unwrap()
    );
    let mut tv = TimeValue::from_csv(csvin);
    if let Some(samples) = samples {
        tv.truncate(samples);
    }
    tv.plot_line(svgout).unwrap();
}
