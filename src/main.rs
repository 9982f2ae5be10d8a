use clap::Parser;
use group_distributor::utils::error::{DistributeError, ErrorSeverity};
use group_distributor::utils::{logger, validation::Validate};
use group_distributor::{
    CliConfig, DistributionEngine, Group, PreparedDistribution, RosterFile, SeededShuffler,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting group-distributor CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let roster_file = match RosterFile::from_file(&config.roster) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ Failed to load roster file '{}': {}", config.roster, e);
            exit_with(&e);
        }
    };
    if let Err(e) = roster_file.validate() {
        exit_with(&e);
    }
    tracing::info!(
        "📁 Loaded {} people and {} existing groups from {}",
        roster_file.people.len(),
        roster_file.groups.len(),
        config.roster
    );

    let request = match config.to_request() {
        Ok(request) => request,
        Err(e) => exit_with(&e),
    };

    // 只有最外層才用時間當種子
    let shuffler = match config.seed {
        Some(seed) => SeededShuffler::new(seed),
        None => SeededShuffler::from_wall_clock(),
    };
    let engine = DistributionEngine::new(shuffler);
    let (roster, mut registry) = roster_file.into_adapters();

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No groups will be created");
        match engine.prepare(&roster, &registry, &request) {
            Ok(prepared) => print_plan(&prepared, config.output_json)?,
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match engine.run(&roster, &mut registry, &request) {
        Ok(report) => {
            tracing::info!("✅ Distribution completed with seed {}", report.seed);
            if config.output_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "✅ Distributed {} people into {} groups ({})",
                    report.member_counts().iter().sum::<usize>(),
                    report.groups.len(),
                    report.strategy
                );
                for group in &report.groups {
                    print_group(group);
                }
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn print_plan(prepared: &PreparedDistribution, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(prepared)?);
        return Ok(());
    }

    println!(
        "Plan ({}, seed {}):",
        prepared.strategy, prepared.seed
    );
    for (name, members) in prepared.names.names().iter().zip(prepared.plan.groups()) {
        println!("  {} ({} people)", name, members.len());
        for person in members {
            println!("    - {}", person);
        }
    }
    Ok(())
}

fn print_group(group: &Group) {
    println!("  {} @ {} ({} people)", group.name, group.location, group.members.len());
    for person in &group.members {
        println!("    - {}", person);
    }
}

fn exit_with(e: &DistributeError) -> ! {
    tracing::error!(
        "❌ Distribution failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
