pub use chrono::{
  NaiveDateTime as DateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  PaginatorTrait, QueryFilter, Set,
};
pub use tracing::{error, info, warn};

pub use crate::error::{Error, Result};
