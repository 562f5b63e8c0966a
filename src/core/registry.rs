//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 백엔드의 모든 서비스/리포지토리/외부 클라이언트를 프로세스 단위 싱글톤으로 관리합니다.
//! Spring Framework의 ApplicationContext 역할을 `inventory` 기반 등록과
//! `TypeId` 키의 전역 컨테이너로 구현합니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring 개념 | 이 시스템 | 비고 |
//! |-------------|-----------|------|
//! | `ApplicationContext` | `ServiceLocator` | 전역 DI 컨테이너 |
//! | `@Service` | `register_service!` | 비즈니스 로직 컴포넌트 |
//! | `@Repository` | `register_repository!` | 데이터 액세스 컴포넌트 |
//! | `@Autowired` | `Arc<T>` 필드 | 필드 타입으로 의존성 추론 |
//! | `@Lazy` | 기본 동작 | 첫 `instance()` 호출 시 생성 |
//! | `@Bean` (인프라) | `ServiceLocator::set()` | DB 풀, Redis 클라이언트 |
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 링크 타임 (Component Scanning)
//!    ├─ register_service! / register_repository! → inventory::submit!
//!    └─ inventory::collect! → 등록 정보 수집
//!
//! 2. 런타임 초기화 (Infrastructure Beans)
//!    └─ main에서 Database, RedisClient를 ServiceLocator::set()으로 등록
//!
//! 3. 의존성 해석 (Autowiring)
//!    ├─ T::instance() → ServiceLocator::get::<T>()
//!    ├─ 캐시 적중 시 즉시 반환
//!    ├─ 미스 시 등록된 생성자 호출 (생성자 내부에서 하위 의존성 재귀 해석)
//!    └─ 생성 완료 후 캐시에 저장
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! pub struct AcademyService {
//!     academy_repo: Arc<AcademyRepository>,
//!     user_repo: Arc<UserRepository>,
//! }
//!
//! crate::register_service!(AcademyService { academy_repo, user_repo });
//!
//! let service = AcademyService::instance();
//! ```
//!
//! 필드 주입이 어울리지 않는 컴포넌트(환경 변수로 구성되는 외부 클라이언트 등)는
//! 생성자 함수를 직접 넘깁니다.
//!
//! ```rust,ignore
//! crate::register_service!(StorageClient, StorageClient::from_env);
//! ```
//!
//! ## 순환 참조
//!
//! 생성 중인 타입을 `initializing` 집합으로 추적하며, 같은 타입을 다시 요청하면
//! 즉시 패닉합니다. 잘못된 배선은 `initialize_all()` 단계에서 드러나도록
//! 서버 시작 전에 모든 컴포넌트를 미리 생성합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

type Instance = Arc<dyn Any + Send + Sync>;

/// 서비스 등록 정보
///
/// `register_service!` 매크로가 생성하며 `inventory`로 수집됩니다.
pub struct ServiceRegistration {
    pub name: &'static str,
    pub type_id: fn() -> TypeId,
    pub constructor: fn() -> Instance,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub type_id: fn() -> TypeId,
    pub constructor: fn() -> Instance,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

struct Constructor {
    name: &'static str,
    build: fn() -> Instance,
}

/// TypeId → 생성자 인덱스
///
/// 첫 조회 시 한 번 구성됩니다.
static CONSTRUCTORS: Lazy<HashMap<TypeId, Constructor>> = Lazy::new(|| {
    let mut index = HashMap::new();

    let mut repositories = 0;
    for registration in inventory::iter::<RepositoryRegistration>() {
        index.insert(
            (registration.type_id)(),
            Constructor { name: registration.name, build: registration.constructor },
        );
        repositories += 1;
    }
    print_cache_initialized("Repository", repositories);

    let mut services = 0;
    for registration in inventory::iter::<ServiceRegistration>() {
        index.insert(
            (registration.type_id)(),
            Constructor { name: registration.name, build: registration.constructor },
        );
        services += 1;
    }
    print_cache_initialized("Service", services);

    index
});

/// 전역 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Instance>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 타입에 해당하는 싱글톤 인스턴스를 가져옵니다.
    ///
    /// # Panics
    ///
    /// - 등록되지 않은 타입을 요청한 경우
    /// - 순환 의존성이 감지된 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_name = std::any::type_name::<T>();

        Self::resolve(TypeId::of::<T>(), type_name)
            .downcast::<T>()
            .unwrap_or_else(|_| panic!("Type mismatch in ServiceLocator: {}", type_name))
    }

    /// 이미 생성되었거나 `set()`으로 등록된 인스턴스만 조회합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 인프라 컴포넌트(데이터베이스 풀, Redis 클라이언트 등)를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        println!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(PoisonError::into_inner);
        instances.insert(TypeId::of::<T>(), instance as Instance);
    }

    fn resolve(type_id: TypeId, type_name: &str) -> Instance {
        {
            let instances = LOCATOR.instances.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone();
            }
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let constructor = CONSTRUCTORS.get(&type_id);

        // 생성자는 하위 의존성을 재귀적으로 해석하므로 락을 잡지 않은 상태로 호출
        let created = constructor.map(|c| {
            log::debug!("Creating component: {}", c.name);
            (c.build)()
        });

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&type_id);

        let Some(created) = created else {
            panic!(
                "Component not found: {}. Register it with register_service!/register_repository! or ServiceLocator::set()",
                type_name
            );
        };

        let mut instances = LOCATOR.instances.write().unwrap_or_else(PoisonError::into_inner);
        instances.entry(type_id).or_insert(created).clone()
    }

    fn extract_clean_type_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 인프라 컴포넌트를 `set()`으로 등록한 뒤 서버 시작 전에 호출해야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repositories.len();
        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");
            for registration in repositories {
                Self::resolve((registration.type_id)(), registration.name);
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repo_count);
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = services.len();
        if service_count > 0 {
            print_step_start(2, "Creating Service instances");
            for registration in services {
                Self::resolve((registration.type_id)(), registration.name);
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);
        Ok(())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __register_component {
    ($registration:ident, $ty:ident, $ctor:expr) => {
        impl $ty {
            /// 싱글톤 인스턴스를 반환합니다.
            pub fn instance() -> ::std::sync::Arc<Self> {
                $crate::core::registry::ServiceLocator::get::<Self>()
            }
        }

        ::inventory::submit! {
            $crate::core::registry::$registration {
                name: stringify!($ty),
                type_id: || ::std::any::TypeId::of::<$ty>(),
                constructor: || {
                    let component: $ty = ($ctor)();
                    ::std::sync::Arc::new(component) as ::std::sync::Arc<dyn ::std::any::Any + Send + Sync>
                },
            }
        }
    };
}

/// 서비스 등록 매크로
///
/// - `register_service!(Type { field_a, field_b })`: 각 필드를 `ServiceLocator::get()`으로 주입
/// - `register_service!(Type, constructor_fn)`: 생성자 함수 호출
#[macro_export]
macro_rules! register_service {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::__register_component!(ServiceRegistration, $ty, || $ty {
            $($field: $crate::core::registry::ServiceLocator::get(),)*
        });
    };
    ($ty:ident, $ctor:expr) => {
        $crate::__register_component!(ServiceRegistration, $ty, $ctor);
    };
}

/// 리포지토리 등록 매크로
///
/// 사용법은 `register_service!`와 같습니다.
#[macro_export]
macro_rules! register_repository {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::__register_component!(RepositoryRegistration, $ty, || $ty {
            $($field: $crate::core::registry::ServiceLocator::get(),)*
        });
    };
    ($ty:ident, $ctor:expr) => {
        $crate::__register_component!(RepositoryRegistration, $ty, $ctor);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SampleConfig {
        label: &'static str,
    }

    struct SampleRepository {
        config: Arc<SampleConfig>,
    }

    crate::register_repository!(SampleRepository { config });

    struct SampleService {
        sample_repo: Arc<SampleRepository>,
    }

    crate::register_service!(SampleService { sample_repo });

    struct CountingService {
        created_at: std::time::Instant,
    }

    fn build_counting_service() -> CountingService {
        CountingService { created_at: std::time::Instant::now() }
    }

    crate::register_service!(CountingService, build_counting_service);

    #[test]
    fn test_set_and_get_infrastructure() {
        struct Marker(u32);
        ServiceLocator::set(Arc::new(Marker(7)));

        assert_eq!(ServiceLocator::get::<Marker>().0, 7);
        assert!(ServiceLocator::try_get::<Marker>().is_some());
    }

    #[test]
    fn test_field_injection_resolves_dependencies() {
        ServiceLocator::set(Arc::new(SampleConfig { label: "sample" }));

        let service = SampleService::instance();
        assert_eq!(service.sample_repo.config.label, "sample");
        assert!(Arc::ptr_eq(&service.sample_repo, &SampleRepository::instance()));
    }

    #[test]
    fn test_constructor_registration_is_singleton() {
        let first = CountingService::instance();
        let second = CountingService::instance();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.created_at, second.created_at);
    }

    #[test]
    #[should_panic(expected = "Component not found")]
    fn test_unregistered_component_panics() {
        struct Unregistered;
        let _ = ServiceLocator::get::<Unregistered>();
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("crate::services::auth::TokenService"),
            "TokenService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Plain"), "Plain");
    }
}
