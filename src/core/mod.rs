pub mod classify;
pub mod decode;
pub mod engine;
pub mod extract;
pub mod pipeline;
pub mod token;

pub use crate::domain::model::{
    AccessToken, CheckReport, Classification, Extraction, Record, RecordSet,
};
pub use crate::domain::ports::{CapabilityChecker, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
