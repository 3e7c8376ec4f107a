pub mod deal_service;
pub mod import_service;
pub mod ranking_service;
pub mod search_service;
pub mod tracking_service;
