use std::fs::read_to_string;

use roomdraw::{Problem, RandomDraw};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: roomdraw <problem.yaml> | roomdraw generate [seed] [students]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid YAML
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next().ok_or(USAGE)?;

    if first == "generate" {
        let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0);
        let mut draw = RandomDraw::spring_2021();
        if let Some(students) = args.next() {
            draw.students = students.parse()?;
        }
        println!("{}", serde_yaml::to_string(&draw.generate(seed))?);
        return Ok(());
    }

    let buf = read_to_string(first)?;
    let problem: Problem = serde_yaml::from_str(&buf)?;
    let solution = problem.solve()?;

    println!("{}", serde_yaml::to_string(&solution)?);
    Ok(())
}
