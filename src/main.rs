use clap::Parser;
use rustcamp::challenges::build_sets;
use rustcamp::utils::{logger, validation::Validate};
use rustcamp::{CampRunner, CliConfig, LocalStorage, SampleData, SampleProfile};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting rustcamp CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 產生樣本資料
    let profile = SampleProfile {
        students: config.students,
        courses: config.courses,
        seed: config.seed,
    };
    let data = match SampleData::generate(&profile) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("❌ Sample data generation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!(
        "👩‍🎓 Generated {} students, {} courses, {} enrollments",
        data.students.len(),
        data.courses.len(),
        data.enrollments.len()
    );

    // 建立存儲與挑戰集
    let storage = LocalStorage::new(config.output_path.clone());
    let sets = match build_sets(&config.sets, &config, &storage) {
        Ok(sets) => sets,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let mut runner = CampRunner::new_with_monitoring(storage, monitor_enabled);
    for set in sets {
        runner.register(set);
    }

    match runner.run(&data).await {
        Ok(summary) => {
            tracing::info!("✅ All challenge sets finished!");
            println!("✅ All challenge sets finished!");
            println!(
                "📊 {} result lines across {} sets",
                summary.total_entries(),
                summary.reports.len()
            );
            println!("📁 Report bundle saved under: {}", config.output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!("❌ Camp run failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                rustcamp::utils::error::ErrorSeverity::Low => 0,
                rustcamp::utils::error::ErrorSeverity::Medium => 2,
                rustcamp::utils::error::ErrorSeverity::High => 1,
                rustcamp::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
