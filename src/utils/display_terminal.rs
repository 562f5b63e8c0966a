//! 서비스 레지스트리 기동 출력
//!
//! `ServiceLocator::initialize_all()`이 컴포넌트를 미리 생성하는 과정을 표준 출력에 그립니다.
//! 로그 필터와 무관하게 항상 보이도록 `println!`을 사용합니다.
//!
//! ```text
//! ╔══════════════════════════════════════════════════╗
//! ║         🔄 INITIALIZING SERVICE REGISTRY         ║
//! ╚══════════════════════════════════════════════════╝
//! → Step 1: Creating Repository instances
//!    ├─ AcademyRepository: ✓ Created
//! ✓ Step 1: Repository instances created (8 items)
//! ```

const BOX_WIDTH: usize = 50;

/// 가운데 정렬된 제목 상자 (3줄)
pub fn boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!("╔{border}╗\n║{:^width$}║\n╚{border}╝", title, width = BOX_WIDTH)
}

pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// `   ├─ {name}: {status}`
///
/// `name`은 모듈 경로가 붙은 타입 이름이어도 마지막 세그먼트만 출력합니다.
pub fn sub_task_line(name: &str, status: &str) -> String {
    let short = name.rsplit("::").next().unwrap_or(name);
    format!("   ├─ {}: {}", short, status)
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("{}", sub_task_line(name, status));
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services/Clients: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 생성자 인덱스 구성 결과 (`kind`: "Repository" 또는 "Service")
pub fn print_cache_initialized(kind: &str, count: usize) {
    println!("   ├─ {} constructors indexed: {}", kind, count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_lines_have_equal_width() {
        let rendered = boxed_title("READY");
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths, vec![BOX_WIDTH + 2; 3]);
        assert!(rendered.lines().nth(1).is_some_and(|l| l.contains("READY")));
    }

    #[test]
    fn test_sub_task_line_strips_module_path() {
        assert_eq!(
            sub_task_line("yoga_marketplace_backend::services::academies::AcademyService", "✓ Created"),
            "   ├─ AcademyService: ✓ Created"
        );
        assert_eq!(sub_task_line("Database", "ok"), "   ├─ Database: ok");
    }
}
