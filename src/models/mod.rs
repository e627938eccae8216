pub mod column;
pub mod daily;
pub mod labels;
pub mod summary;

pub use column::Column;
pub use daily::{DailyRecord, DailyRecordBuilder, RawDayRow};
pub use labels::{Month, Season};
pub use summary::{
    ColumnStats, Dashboard, Description, Histogram, HistogramBin, MonthRow, MonthSummary,
    MonthlyCondition, SeasonRow, SeasonSummary, TopMonthDetail, TopMonthStats, TopSeasonDetail,
    UsageTotals,
};
