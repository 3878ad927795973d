//! 매매일지 도메인 모델과 집계 로직.

mod aggregation;
mod calendar;
mod insights;
mod intake;
mod psychology;
mod snapshot;
mod statistics;
mod store;
mod trade;

pub use aggregation::*;
pub use calendar::*;
pub use insights::*;
pub use intake::*;
pub use psychology::*;
pub use snapshot::*;
pub use statistics::*;
pub use store::*;
pub use trade::*;
