mod common;
pub use self::common::{OutputSize, Query};

mod daily;
pub use self::daily::DailySeriesQuery;
