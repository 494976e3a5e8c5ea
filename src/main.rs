use pokemon_battle_core::sim::ai::Difficulty;
use pokemon_battle_sim::{run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--teams teams.json] [--sims-per-cell N] [--seed SEED] \
[--output matrix.csv] [--difficulty easy|normal|hard] [--log-json battle.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut teams_path = PathBuf::from("teams.json");
    let mut sims_per_cell = 100usize;
    let mut seed = 0u64;
    let mut output_path = PathBuf::from("matrix.csv");
    let mut difficulty = None;
    let mut log_json = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--teams" => {
                teams_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--teams requires a path (e.g. --teams teams.json)")
                })?;
            }
            "--sims-per-cell" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims-per-cell requires a number"))?;
                sims_per_cell = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--output" => {
                output_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output matrix.csv)")
                })?;
            }
            "--difficulty" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--difficulty requires easy, normal or hard"))?;
                difficulty = Some(Difficulty::from_name(&val).ok_or_else(|| {
                    anyhow::anyhow!("Unknown difficulty {val} (use easy, normal or hard)")
                })?);
            }
            "--log-json" => {
                log_json = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--log-json requires a path (e.g. --log-json battle.json)")
                })?);
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        teams_path,
        sims_per_cell,
        seed,
        output_path,
        difficulty,
        log_json,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = parse_args()?;
    run(opts)
}
