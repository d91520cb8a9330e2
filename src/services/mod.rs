pub mod picker_service;
pub mod tokio_executor;

pub use picker_service::PickerService;
pub use tokio_executor::TokioExecutor;
