//! 참조 데이터 적재 도구
//!
//! ```bash
//! cargo run --bin seed -- --areas seed/areas.json --yoga seed/yoga.json --reindex
//! ```
//!
//! 지역과 요가 분류는 이름 기준 upsert입니다. `--reindex`는 데이터베이스의 요가 분류로
//! Elasticsearch 인덱스를 다시 만듭니다(`ELASTICSEARCH_URL` 필요).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use serde::de::DeserializeOwned;
use yoga_marketplace_backend::core::registry::ServiceLocator;
use yoga_marketplace_backend::db::Database;
use yoga_marketplace_backend::services::references::{AreaSeed, ReferenceSeeder, YogaGroupSeed, YogaService};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "지역/요가 분류 참조 데이터 적재")]
struct Args {
    /// 시/도와 시/군/구 JSON 파일
    #[arg(long)]
    areas: Option<PathBuf>,

    /// 요가 분류 JSON 파일
    #[arg(long)]
    yoga: Option<PathBuf>,

    /// 적재 후 검색 인덱스 재생성
    #[arg(long, default_value_t = false)]
    reindex: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("❌ 참조 데이터 적재 실패: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.areas.is_none() && args.yoga.is_none() && !args.reindex {
        return Err("--areas, --yoga, --reindex 중 하나 이상을 지정해야 합니다".into());
    }

    let database = Database::new().await?;
    ServiceLocator::set(Arc::new(database));

    let seeder = ReferenceSeeder::instance();

    if let Some(path) = &args.areas {
        let areas: Vec<AreaSeed> = read_json(path)?;
        let summary = seeder.seed_areas(&areas).await?;
        info!("📍 {} → 시/도 {}, 시/군/구 {}", path.display(), summary.parents, summary.children);
    }

    if let Some(path) = &args.yoga {
        let groups: Vec<YogaGroupSeed> = read_json(path)?;
        let summary = seeder.seed_yoga(&groups).await?;
        info!("🧘 {} → 그룹 {}, 요가 {}", path.display(), summary.parents, summary.children);
    }

    if args.reindex {
        let indexed = YogaService::instance().reindex().await?;
        info!("🔎 검색 인덱스 재생성 완료 - 문서 {}건", indexed);
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path).map_err(|e| format!("{} 읽기 실패: {}", path.display(), e))?;
    let parsed = serde_json::from_str(&raw).map_err(|e| format!("{} 파싱 실패: {}", path.display(), e))?;
    Ok(parsed)
}
