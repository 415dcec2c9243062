use chrono::NaiveDate;

use crate::limits::*;
use crate::model::*;

use super::EngineError;

pub(crate) fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, EngineError> {
    if start > end {
        return Err(EngineError::InvalidRange(DateRange { start, end }));
    }
    Ok(DateRange::new(start, end))
}

pub(crate) fn validate_name(name: &str, what: &'static str) -> Result<(), EngineError> {
    if name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded(what));
    }
    Ok(())
}

pub(crate) fn validate_demand(demand: &Demand) -> Result<(), EngineError> {
    if demand.total() > MAX_DEMAND_PER_REQUEST {
        return Err(EngineError::LimitExceeded("too many rooms requested"));
    }
    Ok(())
}
