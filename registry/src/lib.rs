use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::notifier::GatewayNotifier;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::location::LocationRepositoryImpl;
use adapter::repository::slot::SlotRepositoryImpl;
use kernel::notifier::Notifier;
use kernel::repository::booking::BookingRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::location::LocationRepository;
use kernel::repository::slot::SlotRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    slot_repository: Arc<dyn SlotRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    location_repository: Arc<dyn LocationRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let slot_repository = Arc::new(SlotRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let location_repository = Arc::new(LocationRepositoryImpl::new(pool.clone()));
        let notifier = Arc::new(GatewayNotifier::new(app_config.notifier));
        Self {
            health_check_repository,
            slot_repository,
            booking_repository,
            location_repository,
            notifier,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn slot_repository(&self) -> Arc<dyn SlotRepository> {
        self.slot_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn location_repository(&self) -> Arc<dyn LocationRepository> {
        self.location_repository.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }
}
