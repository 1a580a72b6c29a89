use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use planeverb_bench::report;
use planeverb_bench::runner::BenchmarkRunner;
use planeverb_bench::scenes;
use planeverb_core::config::load_config_from_str;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut run_count = 10u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = arg_value(&args, i).parse().unwrap_or_else(|_| {
                    eprintln!("invalid --regression-threshold value");
                    process::exit(1);
                });
            }
            "--runs" => {
                i += 1;
                run_count = arg_value(&args, i).parse().unwrap_or_else(|_| {
                    eprintln!("invalid --runs value");
                    process::exit(1);
                });
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --config <path>                Grid configuration (RON)");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --runs <n>                     Generations per scene (default: 10)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => {
            let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", path.display(), e);
                process::exit(1);
            });
            load_config_from_str(&source).unwrap_or_else(|e| {
                eprintln!("Invalid config {}: {}", path.display(), e);
                process::exit(1);
            })
        }
        None => scenes::default_config(),
    };
    log::info!(
        "Grid {}x{} cells, dx={}m, dt={}s, courant={:.4}",
        config.size_x + 1,
        config.size_y + 1,
        config.cell_size,
        config.time_step,
        config.courant()
    );

    let runner = BenchmarkRunner::new(config, run_count);

    let mut results = Vec::new();
    for scene in &scenes::standard_scenes() {
        match runner.run_scene(scene) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Scene '{}' failed: {}", scene.name, e);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Compare against baseline
    if let Some(ref path) = baseline_path {
        match report::load_baseline(path) {
            Ok(Some(baseline)) => {
                let regressions = report::compare(&results, &baseline, regression_threshold);
                println!(
                    "{}",
                    report::format_comparison(&regressions, regression_threshold)
                );
                if !regressions.is_empty() {
                    eprintln!(
                        "ERROR: {} regressions detected, exiting with code 1",
                        regressions.len()
                    );
                    process::exit(1);
                }
            }
            Ok(None) => log::warn!("Baseline file not found: {}", path.display()),
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        }
    }

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            created_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
            results,
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("{}", e);
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    log::info!("Benchmark complete.");
}

/// Value following the flag at `i - 1`; exits if it is missing.
fn arg_value(args: &[String], i: usize) -> &str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {}", args[i - 1]);
            process::exit(1);
        }
    }
}
