use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sports_quadratics::{
    analyze_trajectory, complete_the_square, evaluate_shot, load_config, max_range_angle, real_roots,
    sample_until_landing, simulate_shot_spread, success_window_from, sweep_launch_angles, sweep_scenario,
    to_vertex_form, ModelConfig, ProjectileParameters, QuadraticCoefficients, Sport, SpreadParams,
    TrajectorySample, UnitSystem,
};

#[derive(Parser)]
#[command(name = "sports-quadratics")]
#[command(version)]
#[command(about = "Quadratic trajectory models for sports shots", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vertex form, completed square and checks for a·x² + b·x + c
    Vertex {
        /// Leading coefficient (must be nonzero)
        #[arg(short, long, allow_negative_numbers = true)]
        a: f64,

        #[arg(short, long, allow_negative_numbers = true)]
        b: f64,

        #[arg(short, long, allow_negative_numbers = true)]
        c: f64,

        /// Horizontal distance to evaluate the height at
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        distance: Option<f64>,

        /// Obstacle height to clear at --distance
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Target height at --distance for a make/miss check
        #[arg(long, allow_negative_numbers = true)]
        target: Option<f64>,

        /// Make/miss tolerance (defaults to the configured tolerance)
        #[arg(long)]
        tolerance: Option<f64>,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Trajectory of a launch from height, angle and speed
    Trajectory {
        /// Release height
        #[arg(long, default_value = "0.0")]
        height: f64,

        /// Launch angle (degrees above horizontal)
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        angle: f64,

        /// Release speed
        #[arg(short = 'v', long)]
        speed: f64,

        /// Unit system (imperial, metric)
        #[arg(short = 'u', long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        /// Gravitational acceleration override
        #[arg(short = 'g', long)]
        gravity: Option<f64>,

        /// Horizontal spacing of the sampled points
        #[arg(long)]
        step: Option<f64>,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Evaluate a shot against a sport preset
    Shot {
        /// basketball, soccer, tennis, football or golf
        #[arg(value_parser = parse_sport)]
        sport: Sport,

        /// Release height (defaults to the preset shot)
        #[arg(long)]
        height: Option<f64>,

        /// Launch angle in degrees (defaults to the preset shot)
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        angle: Option<f64>,

        /// Release speed (defaults to the preset shot)
        #[arg(short = 'v', long)]
        speed: Option<f64>,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Sweep launch angles for range or for a sport's success window
    Sweep {
        /// Sport preset to evaluate at every angle
        #[arg(long, value_parser = parse_sport)]
        sport: Option<Sport>,

        /// Release height (defaults to the preset shot, or 0)
        #[arg(long)]
        height: Option<f64>,

        /// Release speed (required without --sport)
        #[arg(short = 'v', long)]
        speed: Option<f64>,

        #[arg(short = 'u', long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        #[arg(long, default_value = "5.0", allow_negative_numbers = true)]
        min_angle: f64,

        #[arg(long, default_value = "85.0", allow_negative_numbers = true)]
        max_angle: f64,

        #[arg(long, default_value = "1.0")]
        angle_step: f64,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Monte Carlo shot consistency for a sport preset
    Spread {
        #[arg(value_parser = parse_sport)]
        sport: Sport,

        /// Number of simulated shots
        #[arg(short = 'n', long)]
        num_shots: Option<usize>,

        /// Release speed standard deviation
        #[arg(long)]
        speed_std: Option<f64>,

        /// Launch angle standard deviation (degrees)
        #[arg(long)]
        angle_std: Option<f64>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model information and sport presets
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn parse_sport(s: &str) -> Result<Sport, String> {
    Sport::from_str(s).ok_or_else(|| format!("unknown sport '{}' (basketball, soccer, tennis, football, golf)", s))
}

fn parse_units(s: &str) -> Result<UnitSystem, String> {
    UnitSystem::from_str(s).ok_or_else(|| format!("unknown unit system '{}' (imperial, metric)", s))
}

#[derive(Debug, Serialize)]
struct SampleRow {
    distance: f64,
    height: f64,
    flags: String,
}

impl From<&TrajectorySample> for SampleRow {
    fn from(sample: &TrajectorySample) -> Self {
        Self {
            distance: sample.distance(),
            height: sample.height(),
            flags: sample.flags.iter().map(|f| f.as_str()).collect::<Vec<_>>().join("|"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ModelConfig::default(),
    };
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Vertex { a, b, c, distance, threshold, target, tolerance, output } => {
            let coeffs = QuadraticCoefficients::new(a, b, c);
            let tolerance = tolerance.unwrap_or(config.tolerance);
            display_vertex(&coeffs, distance, threshold, target, tolerance, output)?;
        }

        Commands::Trajectory { height, angle, speed, units, gravity, step, output } => {
            let units = units.unwrap_or(config.units);
            let gravity = gravity.or(config.gravity).unwrap_or_else(|| units.gravity());
            let params = ProjectileParameters::new(height, angle, speed, units).with_gravity(gravity);
            let step = step.unwrap_or(config.sample_step);
            display_trajectory(&params, units, step, output)?;
        }

        Commands::Shot { sport, height, angle, speed, output } => {
            let scenario = sport.scenario();
            let mut shot = scenario.default_shot;
            if let Some(height) = height {
                shot.initial_height = height;
            }
            if let Some(angle) = angle {
                shot = shot.with_launch_angle(angle);
            }
            if let Some(speed) = speed {
                shot = shot.with_initial_speed(speed);
            }

            let outcome = evaluate_shot(&scenario, &shot)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(io::stdout());
                    writer.write_record(["sport", "peak_distance", "peak_height", "landing_distance", "goal_met", "cleared", "success"])?;
                    writer.write_record([
                        sport.to_string(),
                        format!("{:.3}", outcome.trajectory.peak_distance),
                        format!("{:.3}", outcome.trajectory.peak_height),
                        outcome.trajectory.landing_distance.map(|d| format!("{:.3}", d)).unwrap_or_default(),
                        outcome.goal_met.to_string(),
                        outcome.clears_obstacles().to_string(),
                        outcome.is_success().to_string(),
                    ])?;
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    let unit = UnitSystem::Imperial.distance_label();
                    println!("╔════════════════════════════════════════╗");
                    println!("║{:^40}║", format!("{} SHOT", sport.to_string().to_uppercase()));
                    println!("╠════════════════════════════════════════╣");
                    row("Release Height:", format!("{:.2} {}", shot.initial_height, unit));
                    row("Launch Angle:", format!("{:.1}°", shot.launch_angle_deg));
                    row("Release Speed:", format!("{:.2} {}", shot.initial_speed, UnitSystem::Imperial.speed_label()));
                    row("Peak Height:", format!("{:.2} {}", outcome.trajectory.peak_height, unit));
                    row("Peak Distance:", format!("{:.2} {}", outcome.trajectory.peak_distance, unit));
                    row(
                        "Lands At:",
                        outcome.trajectory.landing_distance.map_or("never".to_string(), |d| format!("{:.2} {}", d, unit)),
                    );
                    if !outcome.obstacles.is_empty() {
                        println!("╠════════════════════════════════════════╣");
                        for obstacle in &outcome.obstacles {
                            row(
                                &format!("{}:", obstacle.name),
                                format!(
                                    "{:.2} {} {}",
                                    obstacle.height_at_obstacle,
                                    unit,
                                    if obstacle.cleared { "CLEAR" } else { "BLOCKED" }
                                ),
                            );
                        }
                    }
                    println!("╠════════════════════════════════════════╣");
                    row("Goal Met:", if outcome.goal_met { "yes" } else { "no" }.to_string());
                    row("Deviation:", outcome.deviation.map_or("-".to_string(), |d| format!("{:+.2} {}", d, unit)));
                    row("Result:", if outcome.is_success() { "SUCCESS" } else { "MISS" }.to_string());
                    println!("╚════════════════════════════════════════╝");
                    println!("{}", scenario.description);
                }
            }
        }

        Commands::Sweep { sport, height, speed, units, min_angle, max_angle, angle_step, output } => {
            let units = units.unwrap_or(config.units);
            match sport {
                Some(sport) => {
                    let scenario = sport.scenario();
                    let mut base = scenario.default_shot;
                    if let Some(height) = height {
                        base.initial_height = height;
                    }
                    if let Some(speed) = speed {
                        base = base.with_initial_speed(speed);
                    }
                    let points = sweep_scenario(&scenario, &base, min_angle, max_angle, angle_step);
                    let window = success_window_from(&points);
                    match output {
                        OutputFormat::Json => {
                            let value = serde_json::json!({ "sport": sport, "points": points, "window": window });
                            println!("{}", serde_json::to_string_pretty(&value)?);
                        }
                        OutputFormat::Csv => {
                            let mut writer = csv::Writer::from_writer(io::stdout());
                            for point in &points {
                                writer.serialize(point)?;
                            }
                            writer.flush()?;
                        }
                        OutputFormat::Table => {
                            println!("╔════════════════════════════════════════╗");
                            println!("║{:^40}║", format!("{} SUCCESS WINDOW", sport.to_string().to_uppercase()));
                            println!("╠════════════════════════════════════════╣");
                            row("Angles Tested:", points.len().to_string());
                            row("Successful:", points.iter().filter(|p| p.success).count().to_string());
                            match window {
                                Some(window) => {
                                    row("Window:", format!("{:.1}° - {:.1}°", window.low_deg, window.high_deg));
                                    row("Width:", format!("{:.1}°", window.width_deg()));
                                    row("Most Forgiving:", format!("{:.1}°", window.optimal_deg));
                                }
                                None => row("Window:", "none".to_string()),
                            }
                            println!("╚════════════════════════════════════════╝");
                        }
                    }
                }
                None => {
                    let speed = speed.ok_or("--speed is required when no --sport is given")?;
                    let gravity = config.gravity.unwrap_or_else(|| units.gravity());
                    let base = ProjectileParameters::new(height.unwrap_or(0.0), 0.0, speed, units).with_gravity(gravity);
                    let points = sweep_launch_angles(&base, min_angle, max_angle, angle_step);
                    let best = max_range_angle(&base, min_angle, max_angle, angle_step);
                    match output {
                        OutputFormat::Json => {
                            let value = serde_json::json!({ "points": points, "max_range": best });
                            println!("{}", serde_json::to_string_pretty(&value)?);
                        }
                        OutputFormat::Csv => {
                            let mut writer = csv::Writer::from_writer(io::stdout());
                            for point in &points {
                                writer.serialize(point)?;
                            }
                            writer.flush()?;
                        }
                        OutputFormat::Table => {
                            let unit = units.distance_label();
                            println!("┌──────────┬────────────┬────────────┬────────────┐");
                            println!("│ Angle(°) │  Peak X    │  Peak Y    │  Lands At  │");
                            println!("├──────────┼────────────┼────────────┼────────────┤");
                            for p in &points {
                                println!(
                                    "│ {:>8.1} │ {:>10.2} │ {:>10.2} │ {:>10} │",
                                    p.launch_angle_deg,
                                    p.peak_distance,
                                    p.peak_height,
                                    p.landing_distance.map_or("-".to_string(), |d| format!("{:.2}", d))
                                );
                            }
                            println!("└──────────┴────────────┴────────────┴────────────┘");
                            if let Some(best) = best {
                                println!(
                                    "Maximum range at {:.1}°: {:.2} {}",
                                    best.launch_angle_deg,
                                    best.landing_distance.unwrap_or(0.0),
                                    unit
                                );
                            }
                        }
                    }
                }
            }
        }

        Commands::Spread { sport, num_shots, speed_std, angle_std, seed, output } => {
            let scenario = sport.scenario();
            let defaults = config.spread_params();
            let params = SpreadParams {
                num_shots: num_shots.unwrap_or(defaults.num_shots),
                speed_std_dev: speed_std.unwrap_or(defaults.speed_std_dev),
                angle_std_dev_deg: angle_std.unwrap_or(defaults.angle_std_dev_deg),
                seed: seed.or(defaults.seed),
            };
            let results = simulate_shot_spread(&scenario, &scenario.default_shot, &params)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(io::stdout());
                    writer.write_record(["metric", "value"])?;
                    writer.write_record(["attempts".to_string(), results.attempts.to_string()])?;
                    writer.write_record(["makes".to_string(), results.makes.to_string()])?;
                    writer.write_record(["skipped".to_string(), results.skipped.to_string()])?;
                    writer.write_record(["make_percentage".to_string(), format!("{:.2}", results.make_percentage())])?;
                    writer.write_record(["mean_peak_height".to_string(), format!("{:.3}", results.mean_peak_height)])?;
                    writer.write_record(["std_peak_height".to_string(), format!("{:.3}", results.std_peak_height)])?;
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    let unit = UnitSystem::Imperial.distance_label();
                    println!("╔════════════════════════════════════════╗");
                    println!("║{:^40}║", format!("{} SHOT SPREAD", sport.to_string().to_uppercase()));
                    println!("║{:^40}║", format!("{} simulated shots", params.num_shots));
                    println!("╠════════════════════════════════════════╣");
                    row("Attempts:", results.attempts.to_string());
                    row("Makes:", results.makes.to_string());
                    row("Skipped:", results.skipped.to_string());
                    row("Make Percentage:", format!("{:.1} %", results.make_percentage()));
                    println!("╠════════════════════════════════════════╣");
                    row("Mean Peak Height:", format!("{:.2} {}", results.mean_peak_height, unit));
                    row("Std Dev:", format!("{:.2} {}", results.std_peak_height, unit));
                    row(
                        "Mean Landing:",
                        results.mean_landing_distance().map_or("-".to_string(), |d| format!("{:.2} {}", d, unit)),
                    );
                    println!("╚════════════════════════════════════════╝");
                }
            }
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║{:^40}║", format!("SPORTS QUADRATICS v{}", env!("CARGO_PKG_VERSION")));
            println!("╠════════════════════════════════════════╣");
            println!("║ Quadratic trajectory models for        ║");
            println!("║ sports shots.                          ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Vertex form and completing the square║");
            println!("║ • Projectile launch to quadratic       ║");
            println!("║ • Obstacle and target checks           ║");
            println!("║ • Launch-angle sweeps                  ║");
            println!("║ • Monte Carlo shot spread              ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Sports:                                ║");
            for sport in Sport::ALL {
                println!("║ • {:<37}║", sport);
            }
            println!("╠════════════════════════════════════════╣");
            row("Units:", config.units.to_string());
            row("Gravity:", format!("{} {}/s²", config.gravity(), config.units.distance_label()));
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn row(label: &str, value: String) {
    println!("║ {:<19}{:>19} ║", label, value);
}

fn display_vertex(
    coeffs: &QuadraticCoefficients,
    distance: Option<f64>,
    threshold: Option<f64>,
    target: Option<f64>,
    tolerance: f64,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let vertex = to_vertex_form(coeffs)?;
    let square = complete_the_square(coeffs)?;
    let roots = real_roots(coeffs)?;
    let height = distance.map(|x| coeffs.evaluate(x));
    let cleared = distance.zip(threshold).map(|(x, t)| sports_quadratics::clears(coeffs, x, t));
    let within = height
        .zip(target)
        .map(|(h, t)| sports_quadratics::is_within_tolerance(h, t, tolerance));

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "coefficients": coeffs,
                "vertex": vertex,
                "completed_square": square,
                "roots": roots,
                "height": height,
                "clears": cleared,
                "within_tolerance": within,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            writer.write_record(["a", "b", "c", "h", "k", "p", "q"])?;
            writer.write_record(
                [coeffs.a, coeffs.b, coeffs.c, vertex.h, vertex.k, square.p, square.q].map(|v| v.to_string()),
            )?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║              VERTEX FORM               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Standard: {:<29}║", coeffs.to_string());
            println!("║ Vertex:   {:<29}║", vertex.to_string());
            row("Vertex (h, k):", format!("({:.4}, {:.4})", vertex.h, vertex.k));
            row("Axis:", format!("x = {:.4}", vertex.axis_of_symmetry()));
            row("Opens:", if coeffs.opens_upward() { "upward" } else { "downward" }.to_string());
            println!("╠════════════════════════════════════════╣");
            println!("║ COMPLETING THE SQUARE                  ║");
            row("b / 2a:", format!("{:.4}", square.half_linear));
            row("(b / 2a)²:", format!("{:.4}", square.square_term));
            row("(x - p)² = q:", format!("p={:.4} q={:.4}", square.p, square.q));
            row(
                "Roots:",
                roots.map_or("none (real)".to_string(), |(r1, r2)| format!("{:.4}, {:.4}", r1, r2)),
            );
            if let (Some(x), Some(h)) = (distance, height) {
                println!("╠════════════════════════════════════════╣");
                row(&format!("Height at {}:", x), format!("{:.4}", h));
                if let (Some(t), Some(cleared)) = (threshold, cleared) {
                    row(&format!("Clears {}:", t), if cleared { "yes" } else { "no" }.to_string());
                }
                if let (Some(t), Some(within)) = (target, within) {
                    row(&format!("Within ±{} of {}:", tolerance, t), if within { "yes" } else { "no" }.to_string());
                }
            }
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(
    params: &ProjectileParameters,
    units: UnitSystem,
    step: f64,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let result = analyze_trajectory(params)?;
    let samples = sample_until_landing(&result.coefficients, step);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({ "parameters": params, "result": result, "samples": samples });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            for sample in &samples {
                writer.serialize(SampleRow::from(sample))?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let unit = units.distance_label();
            println!("╔════════════════════════════════════════╗");
            println!("║           TRAJECTORY RESULTS           ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ y = {:<35}║", result.coefficients.to_string());
            println!("║ y = {:<35}║", result.vertex.to_string());
            row("Peak Height:", format!("{:.2} {}", result.peak_height, unit));
            row("Peak Distance:", format!("{:.2} {}", result.peak_distance, unit));
            row("Ground Range (2h):", format!("{:.2} {}", result.ground_range, unit));
            row(
                "Lands At:",
                result.landing_distance.map_or("never".to_string(), |d| format!("{:.2} {}", d, unit)),
            );
            println!("╚════════════════════════════════════════╝");

            if !samples.is_empty() {
                println!("\nTrajectory Points:");
                println!("┌────────────┬────────────┬─────────────────┐");
                println!("│  X ({:<2})    │  Y ({:<2})    │ Event           │", unit, unit);
                println!("├────────────┼────────────┼─────────────────┤");
                let stride = (samples.len() / 20).max(1);
                for (i, sample) in samples.iter().enumerate() {
                    let flagged = !sample.flags.is_empty();
                    if i % stride == 0 || i == samples.len() - 1 || flagged {
                        println!(
                            "│ {:>10.2} │ {:>10.2} │ {:<15} │",
                            sample.distance(),
                            sample.height(),
                            SampleRow::from(sample).flags
                        );
                    }
                }
                println!("└────────────┴────────────┴─────────────────┘");
            }
        }
    }

    Ok(())
}
