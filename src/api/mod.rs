// ==========================================
// 城市固体废弃物工具集 - API 层
// ==========================================
// 职责: 面向展示层的业务接口（上传、分摊、问卷）
// ==========================================

pub mod allocation_api;
pub mod classification_api;
pub mod error;

pub use allocation_api::{AllocationApi, AllocationSession};
pub use classification_api::ClassificationApi;
pub use error::{ApiError, ApiResult};
