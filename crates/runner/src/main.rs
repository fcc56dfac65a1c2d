use herald_runner::{DeliveryMode, SimulationConfig, SimulationResults, TradingSimulation};

fn print_help() {
    eprintln!(
        r#"Herald Simulator - news-driven trading simulation

USAGE:
    herald-sim --config <PATH> [OPTIONS]

OPTIONS:
    --config <PATH>     Load run configuration from JSON file
    --mode <pull|push>  Override the delivery mode from the config
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (e.g. herald_runner=debug)

EXAMPLES:
    # Poll agents tick by tick
    herald-sim --config demos/news-run/config.json

    # Same data, events pushed to subscribed agents
    herald-sim --config demos/news-run/config.json --mode push
"#
    );
}

fn print_results(results: &SimulationResults) {
    println!("Orders ({}):", results.total_orders());
    for order in &results.orders {
        println!("  {}  {} t={}", order, order.side, order.time);
    }

    println!("Balances:");
    for (owner, balance) in &results.balances {
        let title: String = owner.title().chars().take(30).collect();
        println!(
            "  {:>3}  {:<30}  ${:.2}",
            owner.id(),
            title,
            *balance as f64 / 100.0
        );
    }

    if results.fees_charged != 0 {
        println!("Fees charged: ${:.2}", results.fees_charged as f64 / 100.0);
    }
    if results.delivery.failures > 0 {
        println!("Failed reactions: {}", results.delivery.failures);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut mode: Option<DeliveryMode> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--mode" | "-m" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --mode requires pull or push");
                    std::process::exit(1);
                }
                mode = Some(args[i].parse()?);
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(path) = config_path else {
        eprintln!("Error: --config is required");
        print_help();
        std::process::exit(1);
    };

    log::info!("Loading configuration from: {}", path);
    let config = SimulationConfig::from_file(&path)?;
    let mode = mode.unwrap_or(config.delivery);

    let (simulation, report) = TradingSimulation::from_config(&config)?;
    log::info!(
        "Simulation {}: {} agents, ticks {}..={}, {} mode, {} input rows skipped",
        config.name,
        simulation.agents().len(),
        config.start_tick,
        config.horizon,
        mode,
        report.skipped()
    );

    let results = simulation.run(mode);
    print_results(&results);
    Ok(())
}
