pub mod proxmox_service;
pub mod pushgateway_service;
pub mod telegram_service;
pub mod upstream;

pub use proxmox_service::ProxmoxService;
pub use pushgateway_service::PushgatewayService;
pub use telegram_service::TelegramService;
pub use upstream::{within_deadline, UpstreamClient};
