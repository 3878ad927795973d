//! 매매일지 전반에서 사용되는 공통 타입.

mod datetime;
mod decimal;
mod year_month;

pub use datetime::*;
pub use decimal::*;
pub use year_month::*;
