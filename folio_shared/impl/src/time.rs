use chrono::{DateTime, SubsecRound, Utc};
use folio_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn now_has_millisecond_precision() {
        let now = TimeServiceImpl.now();
        assert_eq!(now.nanosecond() % 1_000_000, 0);
    }
}
