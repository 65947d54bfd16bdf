use anyhow::Context;
use rustcamp::challenges::build_sets;
use rustcamp::utils::logger;
use rustcamp::utils::validation::Validate;
use rustcamp::{CampRunner, CampTomlConfig, LocalStorage, RunConfig, SampleData};

/// TOML-driven runner for scripted (CI or cron) camp runs. Takes the
/// config path as its only argument and logs JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日誌
    logger::init_batch_logger();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rustcamp.toml".to_string());

    // 載入並驗證配置
    let config = CampTomlConfig::from_file(&config_path)
        .with_context(|| format!("loading camp config from {}", config_path))?;
    config.validate().context("camp config failed validation")?;

    println!("🚀 {} — {}", config.camp.name, config.camp.description);
    println!("📋 Will run the following sets:");
    for set_name in config.sets() {
        println!("  - {}", set_name);
    }

    let profile = config.sample_profile();
    let data = SampleData::generate(&profile).context("generating sample data")?;
    println!(
        "👩‍🎓 Dataset: {} students / {} courses / {} enrollments",
        data.students.len(),
        data.courses.len(),
        data.enrollments.len()
    );

    let storage = LocalStorage::new(config.output_path().to_string());
    let sets = build_sets(&config.sets(), &config, &storage)?;

    let mut runner = CampRunner::new_with_monitoring(storage, config.monitoring_enabled());
    for set in sets {
        runner.register(set);
    }

    let summary = runner.run(&data).await.context("camp run failed")?;

    println!(
        "✅ {} result lines bundled under {}",
        summary.total_entries(),
        config.output_path()
    );

    Ok(())
}
