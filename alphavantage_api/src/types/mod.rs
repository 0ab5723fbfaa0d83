mod series;
pub use self::series::{DailyBar, DailySeriesEnvelope, ErrorEnvelope, MetaData, TIME_SERIES_KEY};

mod stock;
pub use self::stock::{DayData, SortOrder, Stock};
